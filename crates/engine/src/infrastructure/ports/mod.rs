//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Durable storage (could swap JSON files -> browser storage or SQLite)
//! - Clock/Random (for testing)

mod error;
mod storage;
mod testing;

pub use error::StoreError;
pub use storage::KeyValueStore;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use storage::MockKeyValueStore;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
