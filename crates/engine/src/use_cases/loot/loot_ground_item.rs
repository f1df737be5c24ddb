//! Loot ground item use case.
//!
//! Moves a ground item into the character's inventory or purse. Coin piles and
//! coin items both land in the purse. The grant happens first; the ground item
//! is removed only once the grant succeeded, so a full inventory leaves the
//! item lootable.

use vtt_domain::{
    CharacterProfile, CurrencyAmount, DomainError, GroundItemId, GroundPayload, InventorySlotEntry,
    ItemKind, LootEvent,
};

use crate::entities::{
    Acquisition, GroundItemRegistry, InventoryError, InventoryLedger, ItemCatalog, NotificationSink,
};

use super::error::LootError;

/// What a successful loot granted
#[derive(Debug, Clone, PartialEq)]
pub enum Looted {
    Currency(CurrencyAmount),
    Item(InventorySlotEntry),
}

/// Loot ground item use case.
///
/// Orchestrates: ground lookup, template resolution, inventory or purse
/// grant, ground removal.
pub struct LootGroundItem<'a> {
    ground: &'a mut GroundItemRegistry,
    items: &'a ItemCatalog,
    inventory: &'a mut InventoryLedger,
    log: &'a mut dyn NotificationSink,
}

impl<'a> LootGroundItem<'a> {
    pub fn new(
        ground: &'a mut GroundItemRegistry,
        items: &'a ItemCatalog,
        inventory: &'a mut InventoryLedger,
        log: &'a mut dyn NotificationSink,
    ) -> Self {
        Self {
            ground,
            items,
            inventory,
            log,
        }
    }

    /// Execute the loot.
    ///
    /// # Returns
    /// * `Ok(Looted)` - what was granted; the ground item is gone
    /// * `Err(LootError::NotFound)` - already looted or never existed
    /// * `Err(LootError::Inventory)` - grant refused; nothing changed
    pub fn execute(
        mut self,
        ground_item_id: GroundItemId,
        character: &CharacterProfile,
    ) -> Result<Looted, LootError> {
        if character.id != self.inventory.owner() {
            return Err(LootError::UnknownCharacter(character.id));
        }

        let ground_item = self.ground.require(ground_item_id)?.clone();
        let source = ground_item.source.clone();

        let looted = match ground_item.payload {
            GroundPayload::Currency { amount } => {
                self.grant_currency(amount, &character.name, source)?
            }
            GroundPayload::Item { item, quantity } => {
                // Grid items may never have been registered as templates
                let template = self.items.get(item.id).cloned().unwrap_or(item);
                match &template.kind {
                    ItemKind::Currency {
                        denomination,
                        value,
                    } => {
                        let coins = value
                            .checked_mul(u64::from(quantity))
                            .ok_or(InventoryError::Domain(DomainError::CurrencyOverflow))?;
                        let amount = CurrencyAmount::of(*denomination, coins);
                        self.grant_currency(amount, &character.name, source)?
                    }
                    ItemKind::Regular(_) => {
                        let acquisition = Acquisition::looted(&character.name, source);
                        let entry = self.inventory.add_from_template(
                            &template,
                            quantity,
                            &acquisition,
                            self.log,
                        )?;
                        Looted::Item(entry)
                    }
                }
            }
        };

        self.ground.remove(ground_item_id)?;

        tracing::info!(
            ground_item_id = %ground_item_id,
            character_id = %character.id,
            "Ground item looted"
        );
        Ok(looted)
    }

    /// Credit the purse and post one aggregated entry. An empty pile posts nothing.
    fn grant_currency(
        &mut self,
        amount: CurrencyAmount,
        looter: &str,
        source: Option<String>,
    ) -> Result<Looted, LootError> {
        let granted = self.inventory.add_amount(amount)?;
        if !granted.is_empty() {
            self.log
                .post(LootEvent::currency_looted(granted, looter, source).into());
        }
        Ok(Looted::Currency(granted))
    }
}
