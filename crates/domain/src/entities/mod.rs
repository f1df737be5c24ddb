//! Domain entities - Core business objects with identity

mod character;
mod creature;
mod creature_group;
mod ground_item;
mod inventory;
mod item;
mod token;

pub use character::CharacterProfile;
pub use creature::{
    Ability, Attributes, CreatureSize, CreatureTemplate, CreatureType, CurrencyDrop, DamageType,
    DerivedStats, LootEntry, LootTable, Percent, RollRange,
};
pub use creature_group::CreatureGroup;
pub use ground_item::{GroundItem, GroundPayload};
pub use inventory::{InventoryCapacity, InventorySlotEntry, ItemOrigin};
pub use item::{ItemBrief, ItemDetails, ItemKind, ItemPatch, ItemQuality, ItemTemplate};
pub use token::{CombatState, CombatStatePatch, StatusEffect, Token};
