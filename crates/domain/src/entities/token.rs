//! Tokens - battlefield instances of creature templates

use serde::{Deserialize, Serialize};

use crate::value_objects::MapPosition;
use crate::{CreatureId, CreatureTemplate, TokenId};

/// A temporary condition on a token (buff, debuff, damage over time...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub name: String,
    #[serde(default)]
    pub remaining_rounds: Option<u32>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Live combat values. Nothing here is clamped; callers enforce limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatState {
    pub current_hp: i32,
    pub current_mana: i32,
    pub current_action_points: i32,
    #[serde(default)]
    pub effects: Vec<StatusEffect>,
}

impl CombatState {
    /// Fresh state at full resources
    pub fn seeded_from(creature: &CreatureTemplate) -> Self {
        Self {
            current_hp: creature.stats.max_hp,
            current_mana: creature.stats.max_mana,
            current_action_points: creature.stats.max_action_points,
            effects: Vec::new(),
        }
    }

    /// Shallow merge: every `Some` field replaces the current value.
    pub fn apply(&mut self, patch: CombatStatePatch) {
        if let Some(hp) = patch.current_hp {
            self.current_hp = hp;
        }
        if let Some(mana) = patch.current_mana {
            self.current_mana = mana;
        }
        if let Some(ap) = patch.current_action_points {
            self.current_action_points = ap;
        }
        if let Some(effects) = patch.effects {
            self.effects = effects;
        }
    }
}

/// Partial update for [`CombatState`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mana: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_action_points: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<StatusEffect>>,
}

impl CombatStatePatch {
    pub fn hp(value: i32) -> Self {
        Self {
            current_hp: Some(value),
            ..Self::default()
        }
    }

    pub fn mana(value: i32) -> Self {
        Self {
            current_mana: Some(value),
            ..Self::default()
        }
    }

    pub fn action_points(value: i32) -> Self {
        Self {
            current_action_points: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current_hp.is_none()
            && self.current_mana.is_none()
            && self.current_action_points.is_none()
            && self.effects.is_none()
    }
}

/// A creature placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: TokenId,
    pub creature_id: CreatureId,
    pub position: MapPosition,
    #[serde(flatten)]
    pub combat: CombatState,
}

impl Token {
    /// Instantiate a token for `creature` at full resources
    pub fn spawn(creature: &CreatureTemplate, position: MapPosition) -> Self {
        Self {
            id: TokenId::new(),
            creature_id: creature.id,
            position,
            combat: CombatState::seeded_from(creature),
        }
    }
}
