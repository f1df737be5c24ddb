//! VTT Engine library.
//!
//! The stateful core of the virtual tabletop: catalogs, the battlefield,
//! loot, the character's inventory, and the activity log.
//!
//! ## Structure
//!
//! - `entities/` - Stateful services, one per slice of game state
//! - `use_cases/` - Operations that span more than one service
//! - `infrastructure/` - Ports and adapters (storage, clock, randomness, config)
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, StateSummary};
