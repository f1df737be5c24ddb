//! Ground item registry - loot lying on the map.

use std::sync::Arc;

use vtt_domain::{DomainError, GridCell, GroundItem, GroundItemId, GroundPayload};

use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::{ClockPort, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroundItemError {
    #[error("Ground item not found: {0}")]
    NotFound(GroundItemId),
}

impl From<GroundItemError> for DomainError {
    fn from(value: GroundItemError) -> Self {
        match value {
            GroundItemError::NotFound(id) => DomainError::not_found("GroundItem", id),
        }
    }
}

pub struct GroundItemRegistry {
    items: Vec<GroundItem>,
    persisted: Persisted<Vec<GroundItem>>,
    clock: Arc<dyn ClockPort>,
}

impl GroundItemRegistry {
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>) -> Self {
        let persisted = Persisted::new(store, keys::GROUND_ITEMS);
        let items = persisted.load().unwrap_or_default();
        Self {
            items,
            persisted,
            clock,
        }
    }

    /// Place a payload at `cell` under a fresh id.
    pub fn spawn(
        &mut self,
        payload: GroundPayload,
        cell: GridCell,
        source: Option<String>,
    ) -> GroundItem {
        let mut item = GroundItem::new(payload, cell, self.clock.now());
        item.source = source;
        self.items.push(item.clone());
        self.save();
        tracing::debug!(
            ground_item_id = %item.id,
            %cell,
            name = %item.payload.display_name(),
            "Spawned ground item"
        );
        item
    }

    pub fn get(&self, id: GroundItemId) -> Option<&GroundItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn require(&self, id: GroundItemId) -> Result<&GroundItem, GroundItemError> {
        self.get(id).ok_or(GroundItemError::NotFound(id))
    }

    pub fn contains(&self, id: GroundItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[GroundItem] {
        &self.items
    }

    pub fn items_at(&self, cell: GridCell) -> Vec<&GroundItem> {
        self.items.iter().filter(|i| i.cell == cell).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn move_to(
        &mut self,
        id: GroundItemId,
        cell: GridCell,
    ) -> Result<GroundItem, GroundItemError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(GroundItemError::NotFound(id))?;
        item.cell = cell;
        let item = item.clone();
        self.save();
        Ok(item)
    }

    /// Take an item off the map. A second call for the same id fails.
    pub fn remove(&mut self, id: GroundItemId) -> Result<GroundItem, GroundItemError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(GroundItemError::NotFound(id))?;
        let item = self.items.remove(index);
        self.save();
        tracing::debug!(ground_item_id = %id, "Removed ground item");
        Ok(item)
    }

    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        self.save();
        tracing::info!(count, "Cleared ground items");
        count
    }

    fn save(&self) {
        self.persisted.save(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::storage::InMemoryStore;
    use chrono::Utc;
    use vtt_domain::{CurrencyAmount, ItemTemplate};

    fn registry(store: Arc<dyn KeyValueStore>) -> GroundItemRegistry {
        GroundItemRegistry::load(store, Arc::new(FixedClock(Utc::now())))
    }

    #[test]
    fn spawn_then_remove_once() {
        let mut ground = registry(Arc::new(InMemoryStore::new()));
        let coins = ground.spawn(
            GroundPayload::currency(CurrencyAmount::new(0, 3, 0)),
            GridCell::new(2, 2),
            Some("Goblin".into()),
        );
        assert_eq!(coins.source.as_deref(), Some("Goblin"));

        assert!(ground.remove(coins.id).is_ok());
        assert_eq!(ground.remove(coins.id), Err(GroundItemError::NotFound(coins.id)));
    }

    #[test]
    fn items_at_filters_by_cell() {
        let mut ground = registry(Arc::new(InMemoryStore::new()));
        let cell = GridCell::new(4, 1);
        ground.spawn(GroundPayload::item(ItemTemplate::regular("Rope", "tool"), 1), cell, None);
        ground.spawn(GroundPayload::item(ItemTemplate::regular("Torch", "tool"), 2), cell, None);
        let elsewhere = ground.spawn(
            GroundPayload::item(ItemTemplate::regular("Lantern", "tool"), 1),
            GridCell::new(0, 0),
            None,
        );

        assert_eq!(ground.items_at(cell).len(), 2);
        ground.move_to(elsewhere.id, cell).unwrap();
        assert_eq!(ground.items_at(cell).len(), 3);
    }

    #[test]
    fn items_survive_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let id = registry(store.clone())
            .spawn(
                GroundPayload::item(ItemTemplate::regular("Shield", "armor"), 1),
                GridCell::new(7, 7),
                None,
            )
            .id;

        let reloaded = registry(store);
        assert_eq!(reloaded.get(id).map(|i| i.cell), Some(GridCell::new(7, 7)));
    }

    #[test]
    fn clear_removes_everything() {
        let mut ground = registry(Arc::new(InMemoryStore::new()));
        ground.spawn(
            GroundPayload::currency(CurrencyAmount::new(1, 0, 0)),
            GridCell::new(0, 0),
            None,
        );
        assert_eq!(ground.clear(), 1);
        assert!(ground.is_empty());
    }
}
