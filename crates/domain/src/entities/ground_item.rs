//! Ground items - loot resting on the map, not yet owned by anyone

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CurrencyAmount, GridCell};
use crate::{GroundItemId, ItemTemplate};

/// What is lying on the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundPayload {
    /// An item stack. `item` is an embedded copy of the template.
    Item { item: ItemTemplate, quantity: u32 },
    /// A coin pile
    Currency { amount: CurrencyAmount },
}

impl GroundPayload {
    pub fn item(item: ItemTemplate, quantity: u32) -> Self {
        Self::Item {
            item,
            quantity: quantity.max(1),
        }
    }

    pub fn currency(amount: CurrencyAmount) -> Self {
        Self::Currency { amount }
    }

    /// Label for logs and map tooltips
    pub fn display_name(&self) -> String {
        match self {
            Self::Item { item, quantity } if *quantity > 1 => {
                format!("{} x{}", item.name, quantity)
            }
            Self::Item { item, .. } => item.name.clone(),
            Self::Currency { amount } => amount.to_string(),
        }
    }
}

/// A payload placed at a grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundItem {
    pub id: GroundItemId,
    pub payload: GroundPayload,
    pub cell: GridCell,
    /// Where it came from (creature name, "world", a player who dropped it)
    #[serde(default)]
    pub source: Option<String>,
    pub placed_at: DateTime<Utc>,
}

impl GroundItem {
    pub fn new(payload: GroundPayload, cell: GridCell, placed_at: DateTime<Utc>) -> Self {
        Self {
            id: GroundItemId::new(),
            payload,
            cell,
            source: None,
            placed_at,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_includes_stack_size() {
        let potion = ItemTemplate::regular("Healing Draught", "consumable");
        assert_eq!(
            GroundPayload::item(potion.clone(), 3).display_name(),
            "Healing Draught x3"
        );
        assert_eq!(GroundPayload::item(potion, 1).display_name(), "Healing Draught");
    }

    #[test]
    fn item_payload_quantity_is_at_least_one() {
        let payload = GroundPayload::item(ItemTemplate::regular("Rope", "tool"), 0);
        assert!(matches!(payload, GroundPayload::Item { quantity: 1, .. }));
    }

    #[test]
    fn currency_payload_is_tagged() {
        let payload = GroundPayload::currency(CurrencyAmount::new(0, 4, 12));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "currency");
        assert_eq!(json["amount"]["silver"], 4);
    }
}
