//! Domain types for the tabletop state layer.
//!
//! Pure data and invariants: ids, errors, currency arithmetic, the creature,
//! token, item, ground item and inventory entities, and notification payloads.
//! Nothing here performs I/O or reads the clock; callers pass timestamps in.

extern crate self as vtt_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod notifications;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Ability, Attributes, CharacterProfile, CombatState, CombatStatePatch, CreatureGroup,
    CreatureSize, CreatureTemplate, CreatureType, CurrencyDrop, DamageType, DerivedStats,
    GroundItem, GroundPayload, InventoryCapacity, InventorySlotEntry, ItemBrief, ItemDetails,
    ItemKind, ItemOrigin, ItemPatch, ItemQuality, ItemTemplate, LootEntry, LootTable, Percent,
    RollRange, StatusEffect, Token,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{
    CharacterId, CreatureGroupId, CreatureId, GroundItemId, InstanceId, ItemId, NotificationId,
    TokenId,
};

pub use notifications::{
    CombatEvent, LootEvent, NotificationCategory, NotificationEntry, NotificationPayload,
    RemovalReason, ResourceKind, SocialEvent, Speaker,
};

pub use value_objects::{
    CurrencyAmount, CurrencyPurse, Denomination, GridCell, MapPosition, StackChange,
    COPPER_PER_GOLD, COPPER_PER_SILVER,
};
