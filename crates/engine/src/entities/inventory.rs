//! Inventory ledger - the character's carried items and purse.
//!
//! Bounded: at most `rows * cols` entries, one slot each. Adding never merges
//! into an existing stack of the same template. Every add and remove is
//! all-or-nothing and announces itself on the loot log.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vtt_domain::{
    CharacterId, CurrencyAmount, CurrencyPurse, Denomination, DomainError, InstanceId,
    InventoryCapacity, InventorySlotEntry, ItemOrigin, ItemPatch, ItemTemplate, LootEvent,
    RemovalReason, StackChange,
};

use crate::entities::notifications::NotificationSink;
use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::{ClockPort, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory entry not found: {0}")]
    NotFound(InstanceId),
    #[error("Inventory full: {current}/{max} entries")]
    Full { current: u32, max: u32 },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InventoryError> for DomainError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::NotFound(id) => DomainError::not_found("InventoryEntry", id),
            InventoryError::Full { current, max } => DomainError::InventoryFull { current, max },
            InventoryError::Domain(e) => e,
        }
    }
}

/// How an item is arriving, for the entry's origin and the log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub origin: ItemOrigin,
    /// Who receives it
    pub actor: String,
    /// Where it came from (creature, chest, merchant)
    pub source: Option<String>,
}

impl Acquisition {
    /// Picked up off the map
    pub fn looted(actor: impl Into<String>, source: Option<String>) -> Self {
        Self {
            origin: ItemOrigin::Looted,
            actor: actor.into(),
            source,
        }
    }

    /// Dropped straight into the inventory by a creature or event
    pub fn dropped(actor: impl Into<String>, source: Option<String>) -> Self {
        Self {
            origin: ItemOrigin::Dropped,
            actor: actor.into(),
            source,
        }
    }

    fn announce(&self, entry: &InventorySlotEntry) -> LootEvent {
        let item = entry.item.brief();
        let quantity = entry.quantity();
        let looter = self.actor.clone();
        let source = self.source.clone();
        match self.origin {
            ItemOrigin::Looted => LootEvent::ItemLooted {
                item,
                quantity,
                looter,
                source,
            },
            _ => LootEvent::ItemDropped {
                item,
                quantity,
                looter,
                source,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryState {
    owner: CharacterId,
    capacity: InventoryCapacity,
    #[serde(default)]
    entries: Vec<InventorySlotEntry>,
    #[serde(default)]
    purse: CurrencyPurse,
    /// Stored as a plain array
    #[serde(default)]
    open_containers: BTreeSet<InstanceId>,
}

impl InventoryState {
    fn empty(capacity: InventoryCapacity) -> Self {
        Self {
            owner: CharacterId::new(),
            capacity,
            entries: Vec::new(),
            purse: CurrencyPurse::new(),
            open_containers: BTreeSet::new(),
        }
    }
}

pub struct InventoryLedger {
    state: InventoryState,
    persisted: Persisted<InventoryState>,
    clock: Arc<dyn ClockPort>,
}

impl InventoryLedger {
    /// Rehydrate, or start empty with `default_capacity`.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        default_capacity: InventoryCapacity,
    ) -> Self {
        let persisted = Persisted::new(store, keys::INVENTORY);
        let mut state = persisted
            .load()
            .unwrap_or_else(|| InventoryState::empty(default_capacity));

        let InventoryState {
            entries,
            open_containers,
            ..
        } = &mut state;
        open_containers.retain(|id| entries.iter().any(|e| e.instance_id == *id));

        Self {
            state,
            persisted,
            clock,
        }
    }

    pub fn owner(&self) -> CharacterId {
        self.state.owner
    }

    pub fn capacity(&self) -> InventoryCapacity {
        self.state.capacity
    }

    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.slots()
    }

    pub fn entries(&self) -> &[InventorySlotEntry] {
        &self.state.entries
    }

    pub fn get(&self, instance_id: InstanceId) -> Option<&InventorySlotEntry> {
        self.state
            .entries
            .iter()
            .find(|e| e.instance_id == instance_id)
    }

    pub fn purse(&self) -> &CurrencyPurse {
        &self.state.purse
    }

    /// Add a new, unmerged entry built from `template`.
    ///
    /// Fails with [`InventoryError::Full`] at capacity and leaves everything
    /// untouched.
    pub fn add_from_template(
        &mut self,
        template: &ItemTemplate,
        quantity: u32,
        acquisition: &Acquisition,
        sink: &mut dyn NotificationSink,
    ) -> Result<InventorySlotEntry, InventoryError> {
        self.ensure_room()?;
        let entry = InventorySlotEntry::new(
            template.clone(),
            quantity,
            acquisition.origin,
            self.clock.now(),
        )?;
        self.state.entries.push(entry.clone());
        self.save();

        tracing::info!(
            instance_id = %entry.instance_id,
            template_id = %entry.template_id(),
            quantity,
            origin = %acquisition.origin,
            "Added inventory entry"
        );
        sink.post(acquisition.announce(&entry).into());
        Ok(entry)
    }

    /// Delete an entry and announce what left.
    pub fn remove(
        &mut self,
        instance_id: InstanceId,
        reason: RemovalReason,
        sink: &mut dyn NotificationSink,
    ) -> Result<InventorySlotEntry, InventoryError> {
        let entry = self.take(instance_id)?;
        sink.post(
            LootEvent::ItemRemoved {
                item: entry.item.brief(),
                quantity: entry.quantity(),
                reason,
                cell: None,
            }
            .into(),
        );
        Ok(entry)
    }

    /// Remove `quantity` from a stack; the entry goes away when it runs out.
    pub fn remove_quantity(
        &mut self,
        instance_id: InstanceId,
        quantity: u32,
        reason: RemovalReason,
        sink: &mut dyn NotificationSink,
    ) -> Result<StackChange, InventoryError> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1").into());
        }
        let entry = self.entry_mut(instance_id)?;
        let change = StackChange::take(entry.quantity(), quantity);
        let item = entry.item.brief();

        let removed = match change {
            StackChange::Remaining(left) => {
                let removed = entry.quantity() - left;
                entry.set_quantity(left)?;
                self.save();
                removed
            }
            StackChange::Emptied => self.take(instance_id)?.quantity(),
        };

        sink.post(
            LootEvent::ItemRemoved {
                item,
                quantity: removed,
                reason,
                cell: None,
            }
            .into(),
        );
        Ok(change)
    }

    /// Delete an entry without announcing it. Callers post their own event.
    pub(crate) fn take(
        &mut self,
        instance_id: InstanceId,
    ) -> Result<InventorySlotEntry, InventoryError> {
        let index = self
            .state
            .entries
            .iter()
            .position(|e| e.instance_id == instance_id)
            .ok_or(InventoryError::NotFound(instance_id))?;
        let entry = self.state.entries.remove(index);
        self.state.open_containers.remove(&instance_id);
        self.save();
        tracing::info!(
            instance_id = %instance_id,
            template_id = %entry.template_id(),
            "Removed inventory entry"
        );
        Ok(entry)
    }

    /// Move `quantity` of a stack into a new entry with its own instance id.
    pub fn split_stack(
        &mut self,
        instance_id: InstanceId,
        quantity: u32,
    ) -> Result<InventorySlotEntry, InventoryError> {
        let current = self
            .get(instance_id)
            .ok_or(InventoryError::NotFound(instance_id))?
            .quantity();
        if quantity == 0 || quantity >= current {
            return Err(DomainError::validation(format!(
                "Split quantity must be between 1 and {}",
                current.saturating_sub(1)
            ))
            .into());
        }
        self.ensure_room()?;

        let now = self.clock.now();
        let source = self.entry_mut(instance_id)?;
        source.set_quantity(current - quantity)?;
        let split = InventorySlotEntry::new(source.item.clone(), quantity, ItemOrigin::Split, now)?;
        self.state.entries.push(split.clone());
        self.save();

        tracing::debug!(from = %instance_id, to = %split.instance_id, quantity, "Split stack");
        Ok(split)
    }

    pub fn add_currency(
        &mut self,
        denomination: Denomination,
        amount: u64,
    ) -> Result<(), InventoryError> {
        self.state.purse.add(denomination, amount)?;
        self.save();
        tracing::debug!(%denomination, amount, purse = %self.state.purse, "Added currency");
        Ok(())
    }

    /// Add every non-zero part of `amount`; returns what was granted.
    pub fn add_amount(
        &mut self,
        amount: CurrencyAmount,
    ) -> Result<CurrencyAmount, InventoryError> {
        if amount.is_empty() {
            return Ok(amount);
        }
        let granted = self.state.purse.add_amount(amount)?;
        self.save();
        tracing::debug!(%granted, purse = %self.state.purse, "Added currency");
        Ok(granted)
    }

    pub fn remove_currency(
        &mut self,
        denomination: Denomination,
        amount: u64,
    ) -> Result<(), InventoryError> {
        self.state.purse.remove(denomination, amount)?;
        self.save();
        tracing::debug!(%denomination, amount, purse = %self.state.purse, "Removed currency");
        Ok(())
    }

    /// Sum of `weight * quantity` over every entry
    pub fn total_weight(&self) -> f32 {
        self.state
            .entries
            .iter()
            .map(|e| e.item.weight * e.quantity() as f32)
            .sum()
    }

    /// Shallow-merge `patch` into one entry's embedded item copy.
    ///
    /// The catalog template is not touched. An entry that stops being a
    /// container is closed.
    pub fn update_item(
        &mut self,
        instance_id: InstanceId,
        patch: ItemPatch,
    ) -> Result<InventorySlotEntry, InventoryError> {
        let entry = self.entry_mut(instance_id)?;
        entry.item.apply(patch)?;
        let updated = entry.clone();
        if !updated.item.is_container() {
            self.state.open_containers.remove(&instance_id);
        }
        self.save();

        tracing::debug!(
            instance_id = %instance_id,
            name = %updated.item.name,
            "Updated inventory item"
        );
        Ok(updated)
    }

    /// Open a container entry. Non-container items are rejected.
    pub fn open_container(&mut self, instance_id: InstanceId) -> Result<(), InventoryError> {
        let entry = self
            .get(instance_id)
            .ok_or(InventoryError::NotFound(instance_id))?;
        if !entry.item.is_container() {
            return Err(DomainError::validation(format!(
                "{} is not a container",
                entry.item.name
            ))
            .into());
        }
        if self.state.open_containers.insert(instance_id) {
            self.save();
        }
        Ok(())
    }

    /// Close a container. Closing one that is not open is a no-op.
    pub fn close_container(&mut self, instance_id: InstanceId) {
        if self.state.open_containers.remove(&instance_id) {
            self.save();
        }
    }

    pub fn is_container_open(&self, instance_id: InstanceId) -> bool {
        self.state.open_containers.contains(&instance_id)
    }

    /// Resize the grid. Shrinking below the current entry count is rejected.
    pub fn set_capacity(&mut self, rows: u32, cols: u32) -> Result<(), InventoryError> {
        if rows == 0 || cols == 0 {
            return Err(
                DomainError::validation("Inventory needs at least one row and column").into(),
            );
        }
        let capacity = InventoryCapacity::new(rows, cols);
        let slots = usize::try_from(capacity.slots()).unwrap_or(usize::MAX);
        if slots < self.len() {
            return Err(DomainError::validation(format!(
                "Capacity {rows}x{cols} cannot hold {} entries",
                self.len()
            ))
            .into());
        }
        self.state.capacity = capacity;
        self.save();
        Ok(())
    }

    fn slots(&self) -> usize {
        usize::try_from(self.state.capacity.slots()).unwrap_or(usize::MAX)
    }

    fn ensure_room(&self) -> Result<(), InventoryError> {
        if self.is_full() {
            let current = u32::try_from(self.len()).unwrap_or(u32::MAX);
            let max = self.state.capacity.slots();
            tracing::warn!(current, max, "Inventory full");
            return Err(InventoryError::Full { current, max });
        }
        Ok(())
    }

    fn entry_mut(
        &mut self,
        instance_id: InstanceId,
    ) -> Result<&mut InventorySlotEntry, InventoryError> {
        self.state
            .entries
            .iter_mut()
            .find(|e| e.instance_id == instance_id)
            .ok_or(InventoryError::NotFound(instance_id))
    }

    fn save(&self) {
        self.persisted.save(&self.state);
    }
}
