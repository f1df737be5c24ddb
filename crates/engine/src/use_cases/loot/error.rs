//! Loot operation errors.

use vtt_domain::{CharacterId, CreatureId, DomainError, GroundItemId, TokenId};

use crate::entities::{GroundItemError, InventoryError};

/// Errors that can occur while moving loot between the map and an inventory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LootError {
    #[error("Ground item not found: {0}")]
    NotFound(GroundItemId),
    #[error("Unknown character: {0}")]
    UnknownCharacter(CharacterId),
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),
    #[error("Unknown creature: {0}")]
    UnknownCreature(CreatureId),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl From<GroundItemError> for LootError {
    fn from(value: GroundItemError) -> Self {
        match value {
            GroundItemError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<LootError> for DomainError {
    fn from(value: LootError) -> Self {
        match value {
            LootError::NotFound(id) => DomainError::not_found("GroundItem", id),
            LootError::UnknownCharacter(id) => DomainError::not_found("Character", id),
            LootError::TokenNotFound(id) => DomainError::not_found("Token", id),
            LootError::UnknownCreature(id) => DomainError::UnknownCreature(id.to_string()),
            LootError::Inventory(e) => e.into(),
        }
    }
}

impl LootError {
    /// True when the character had no room; the ground item is still there.
    pub fn is_inventory_full(&self) -> bool {
        matches!(self, Self::Inventory(InventoryError::Full { .. }))
    }
}
