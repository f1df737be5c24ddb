//! Use cases - operations that span more than one service.
//!
//! Each use case borrows the services it needs for one call and touches
//! them in a fixed order.

pub mod combat;
pub mod creatures;
pub mod loot;
pub mod social;

pub use combat::{AdjustResource, RollInitiative};
pub use creatures::{AssignToGroup, DeleteCreature};
pub use loot::{DropCreatureLoot, DropToGround, LootError, LootGroundItem, Looted};
pub use social::SocialFeed;
