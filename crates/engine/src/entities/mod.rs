//! Entity modules - stateful services over the game state.
//!
//! Each service owns one slice of state, persists it after every mutation,
//! and is constructed once by [`crate::app::App`]. Operations that touch more
//! than one service live in [`crate::use_cases`].

pub mod catalog;
pub mod ground_items;
pub mod groups;
pub mod inventory;
pub mod notifications;
pub mod tokens;

pub use catalog::{
    Catalog, CatalogError, CatalogRecord, CreatureCatalog, ItemCatalog, ReferenceIndex,
    Unreferenced,
};
pub use ground_items::{GroundItemError, GroundItemRegistry};
pub use groups::CreatureGroups;
pub use inventory::{Acquisition, InventoryError, InventoryLedger};
pub use notifications::{NotificationLog, NotificationSink};
pub use tokens::{TokenError, TokenRegistry};
