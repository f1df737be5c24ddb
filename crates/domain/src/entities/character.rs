//! The character who owns the inventory and purse

use serde::{Deserialize, Serialize};

use crate::CharacterId;

/// Identity used when attributing loot and chat lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub name: String,
}

impl CharacterProfile {
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
