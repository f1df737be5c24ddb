//! Inventory entries - owned item instances

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, InstanceId, ItemId, ItemTemplate};

/// How an entry came to be in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOrigin {
    /// Picked up from the ground
    Looted,
    /// Dropped straight into the inventory by a creature or event
    Dropped,
    Purchased,
    Crafted,
    /// Split off another stack
    Split,
    /// Granted directly (GM tools, quest rewards)
    Granted,
    /// Unknown origin for forward compatibility
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ItemOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Looted => write!(f, "looted"),
            Self::Dropped => write!(f, "dropped"),
            Self::Purchased => write!(f, "purchased"),
            Self::Crafted => write!(f, "crafted"),
            Self::Split => write!(f, "split"),
            Self::Granted => write!(f, "granted"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Inventory grid dimensions. Every entry takes one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCapacity {
    pub rows: u32,
    pub cols: u32,
}

impl InventoryCapacity {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn slots(&self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }
}

impl Default for InventoryCapacity {
    fn default() -> Self {
        Self { rows: 6, cols: 10 }
    }
}

/// An owned stack of one item template.
///
/// Two entries of the same template are independent; entries are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySlotEntry {
    pub instance_id: InstanceId,
    /// Embedded copy of the template this entry was created from
    pub item: ItemTemplate,
    quantity: u32,
    pub origin: ItemOrigin,
    pub acquired_at: DateTime<Utc>,
}

impl InventorySlotEntry {
    /// Create an entry with a fresh instance id. Quantity must be at least 1.
    pub fn new(
        item: ItemTemplate,
        quantity: u32,
        origin: ItemOrigin,
        acquired_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        Ok(Self {
            instance_id: InstanceId::new(),
            item,
            quantity,
            origin,
            acquired_at,
        })
    }

    pub fn template_id(&self) -> ItemId {
        self.item.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set a new stack size. Zero is rejected; remove the entry instead.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        self.quantity = quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_six_by_ten() {
        assert_eq!(InventoryCapacity::default().slots(), 60);
    }

    #[test]
    fn zero_quantity_entries_are_rejected() {
        let item = ItemTemplate::regular("Arrow", "ammunition");
        assert!(InventorySlotEntry::new(item.clone(), 0, ItemOrigin::Looted, Utc::now()).is_err());

        let mut entry = InventorySlotEntry::new(item, 20, ItemOrigin::Looted, Utc::now()).unwrap();
        assert!(entry.set_quantity(0).is_err());
        assert_eq!(entry.quantity(), 20);
    }

    #[test]
    fn entries_from_same_template_get_distinct_instance_ids() {
        let item = ItemTemplate::regular("Torch", "tool");
        let a = InventorySlotEntry::new(item.clone(), 1, ItemOrigin::Looted, Utc::now()).unwrap();
        let b = InventorySlotEntry::new(item, 1, ItemOrigin::Looted, Utc::now()).unwrap();
        assert_eq!(a.template_id(), b.template_id());
        assert_ne!(a.instance_id, b.instance_id);
    }
}
