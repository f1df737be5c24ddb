//! Item templates - static item definitions
//!
//! Templates are read-only to the state layer. Inventory entries and ground
//! items carry an embedded copy so they can be shown and looted without
//! resolving the template again.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Denomination;
use crate::{DomainError, ItemId};

/// Item rarity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemQuality {
    Poor,
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
}

impl fmt::Display for ItemQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
            Self::Artifact => write!(f, "artifact"),
        }
    }
}

/// Gameplay payload of a regular (non-currency) item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    /// Free-form category (e.g. "weapon", "consumable", "container")
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub stat_bonuses: BTreeMap<String, i32>,
    #[serde(default)]
    pub is_container: bool,
}

/// Either a coin item or a regular item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Currency {
        denomination: Denomination,
        #[serde(default = "default_coin_value")]
        value: u64,
    },
    Regular(ItemDetails),
}

fn default_coin_value() -> u64 {
    1
}

/// A static item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quality: ItemQuality,
    #[serde(default)]
    pub icon_id: Option<String>,
    pub kind: ItemKind,
    /// Weight per unit
    #[serde(default)]
    pub weight: f32,
}

impl ItemTemplate {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: String::new(),
            quality: ItemQuality::default(),
            icon_id: None,
            kind,
            weight: 0.0,
        }
    }

    /// A regular item in `category`
    pub fn regular(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::new(
            name,
            ItemKind::Regular(ItemDetails {
                category: category.into(),
                ..ItemDetails::default()
            }),
        )
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_quality(mut self, quality: ItemQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_currency(&self) -> bool {
        matches!(self.kind, ItemKind::Currency { .. })
    }

    pub fn is_container(&self) -> bool {
        matches!(&self.kind, ItemKind::Regular(details) if details.is_container)
    }

    /// The fields a log line or tooltip needs
    pub fn brief(&self) -> ItemBrief {
        ItemBrief {
            template_id: self.id,
            name: self.name.clone(),
            quality: self.quality,
        }
    }
}

/// Partial update for an embedded item copy.
///
/// Unset fields are left alone. `is_container` only applies to regular items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<ItemQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_container: Option<bool>,
}

impl ItemPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn container(is_container: bool) -> Self {
        Self {
            is_container: Some(is_container),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.quality.is_none()
            && self.icon_id.is_none()
            && self.weight.is_none()
            && self.is_container.is_none()
    }
}

impl ItemTemplate {
    /// Shallow-merge `patch`. Nothing changes when any field is rejected.
    pub fn apply(&mut self, patch: ItemPatch) -> Result<(), DomainError> {
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        if patch.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
            return Err(DomainError::validation("Item weight must be a non-negative number"));
        }
        if patch.is_container.is_some() && self.is_currency() {
            return Err(DomainError::validation("Currency items cannot be containers"));
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(icon_id) = patch.icon_id {
            self.icon_id = Some(icon_id);
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let (Some(flag), ItemKind::Regular(details)) = (patch.is_container, &mut self.kind) {
            details.is_container = flag;
        }
        Ok(())
    }
}

/// Display-only summary of an item, embedded in notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBrief {
    pub template_id: ItemId,
    pub name: String,
    pub quality: ItemQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_tagged_by_type() {
        let coin = ItemTemplate::new(
            "Gold Coin",
            ItemKind::Currency {
                denomination: Denomination::Gold,
                value: 1,
            },
        );
        let json = serde_json::to_value(&coin).unwrap();
        assert_eq!(json["kind"]["type"], "currency");
        assert_eq!(json["kind"]["denomination"], "gold");
        assert!(coin.is_currency());
    }

    #[test]
    fn regular_item_is_not_currency() {
        let sword = ItemTemplate::regular("Iron Sword", "weapon").with_quality(ItemQuality::Rare);
        assert!(!sword.is_currency());
        assert_eq!(sword.brief().quality, ItemQuality::Rare);
    }

    #[test]
    fn patch_merges_only_the_given_fields() {
        let mut sword = ItemTemplate::regular("Iron Sword", "weapon").with_description("Plain");
        sword
            .apply(ItemPatch {
                name: Some("  Oathkeeper ".into()),
                weight: Some(3.5),
                ..ItemPatch::default()
            })
            .unwrap();
        assert_eq!(sword.name, "Oathkeeper");
        assert_eq!(sword.weight, 3.5);
        assert_eq!(sword.description, "Plain");
    }

    #[test]
    fn rejected_patch_changes_nothing() {
        let mut coin = ItemTemplate::new(
            "Copper Coin",
            ItemKind::Currency {
                denomination: Denomination::Copper,
                value: 1,
            },
        );
        let before = coin.clone();
        let patch = ItemPatch {
            name: Some("Bag of Coins".into()),
            is_container: Some(true),
            ..ItemPatch::default()
        };
        assert!(coin.apply(patch).is_err());
        assert!(coin.apply(ItemPatch::name("   ")).is_err());
        assert!(coin
            .apply(ItemPatch {
                weight: Some(-1.0),
                ..ItemPatch::default()
            })
            .is_err());
        assert_eq!(coin, before);
    }

    #[test]
    fn container_flag_comes_from_details() {
        let mut bag = ItemTemplate::regular("Satchel", "container");
        assert!(!bag.is_container());
        if let ItemKind::Regular(details) = &mut bag.kind {
            details.is_container = true;
        }
        assert!(bag.is_container());
    }
}
