//! Loot use cases.
//!
//! Everything that moves value between creatures, the map, and the
//! character's inventory.

mod drop_creature_loot;
mod drop_to_ground;
mod error;
mod loot_ground_item;

pub use drop_creature_loot::DropCreatureLoot;
pub use drop_to_ground::DropToGround;
pub use error::LootError;
pub use loot_ground_item::{LootGroundItem, Looted};
