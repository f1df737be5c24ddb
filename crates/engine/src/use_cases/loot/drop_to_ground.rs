//! Drop to ground use case.
//!
//! Takes an entry out of the inventory and leaves it on the map.

use vtt_domain::{GridCell, GroundItem, GroundPayload, InstanceId, LootEvent, RemovalReason};

use crate::entities::{GroundItemRegistry, InventoryError, InventoryLedger, NotificationSink};

pub struct DropToGround<'a> {
    inventory: &'a mut InventoryLedger,
    ground: &'a mut GroundItemRegistry,
    log: &'a mut dyn NotificationSink,
}

impl<'a> DropToGround<'a> {
    pub fn new(
        inventory: &'a mut InventoryLedger,
        ground: &'a mut GroundItemRegistry,
        log: &'a mut dyn NotificationSink,
    ) -> Self {
        Self {
            inventory,
            ground,
            log,
        }
    }

    /// The whole stack moves; the ground item carries the entry's template copy.
    pub fn execute(
        self,
        instance_id: InstanceId,
        cell: GridCell,
        dropped_by: &str,
    ) -> Result<GroundItem, InventoryError> {
        let entry = self.inventory.take(instance_id)?;
        let brief = entry.item.brief();
        let quantity = entry.quantity();

        let ground_item = self.ground.spawn(
            GroundPayload::item(entry.item, quantity),
            cell,
            Some(dropped_by.to_string()),
        );
        self.log.post(
            LootEvent::ItemRemoved {
                item: brief,
                quantity,
                reason: RemovalReason::DroppedOnGround,
                cell: Some(cell),
            }
            .into(),
        );

        tracing::info!(
            instance_id = %instance_id,
            ground_item_id = %ground_item.id,
            %cell,
            "Inventory entry dropped on the ground"
        );
        Ok(ground_item)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use vtt_domain::{CharacterProfile, InventoryCapacity, ItemTemplate, NotificationPayload};

    use super::*;
    use crate::entities::{Acquisition, ItemCatalog};
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{ClockPort, KeyValueStore};
    use crate::infrastructure::storage::InMemoryStore;
    use crate::use_cases::loot::{LootGroundItem, Looted};

    #[test]
    fn dropped_entry_can_be_looted_back() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));
        let mut inventory =
            InventoryLedger::load(store.clone(), clock.clone(), InventoryCapacity::default());
        let mut ground = GroundItemRegistry::load(store.clone(), clock.clone());
        let items = ItemCatalog::load(store, clock);
        let me = CharacterProfile::new(inventory.owner(), "Ayla");
        let mut log: Vec<NotificationPayload> = Vec::new();

        let entry = inventory
            .add_from_template(
                &ItemTemplate::regular("Lantern", "tool"),
                2,
                &Acquisition::looted("Ayla", None),
                &mut log,
            )
            .unwrap();

        let cell = GridCell::new(3, 4);
        let dropped = DropToGround::new(&mut inventory, &mut ground, &mut log)
            .execute(entry.instance_id, cell, "Ayla")
            .unwrap();
        assert!(inventory.is_empty());
        assert_eq!(ground.items_at(cell).len(), 1);
        assert!(matches!(
            log.last(),
            Some(NotificationPayload::Loot(LootEvent::ItemRemoved {
                quantity: 2,
                reason: RemovalReason::DroppedOnGround,
                cell: Some(c),
                ..
            })) if *c == cell
        ));

        let looted = LootGroundItem::new(&mut ground, &items, &mut inventory, &mut log)
            .execute(dropped.id, &me)
            .unwrap();
        let Looted::Item(back) = looted else {
            panic!("expected an item");
        };
        assert_eq!(back.quantity(), 2);
        assert_ne!(back.instance_id, entry.instance_id);
        assert!(ground.is_empty());
    }

    #[test]
    fn when_entry_missing_nothing_spawns() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));
        let mut inventory =
            InventoryLedger::load(store.clone(), clock.clone(), InventoryCapacity::default());
        let mut ground = GroundItemRegistry::load(store, clock);
        let missing = InstanceId::new();

        let result = DropToGround::new(
            &mut inventory,
            &mut ground,
            &mut Vec::<NotificationPayload>::new(),
        )
        .execute(missing, GridCell::new(0, 0), "Ayla");
        assert_eq!(result, Err(InventoryError::NotFound(missing)));
        assert!(ground.is_empty());
    }
}
