//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod persisted;
pub mod ports;
pub mod seed;
pub mod storage;
