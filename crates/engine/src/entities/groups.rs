//! Creature groups (library categories).

use std::sync::Arc;

use vtt_domain::{CreatureGroup, CreatureGroupId, CreatureId, DomainError};

use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::{ClockPort, KeyValueStore};

pub struct CreatureGroups {
    groups: Vec<CreatureGroup>,
    persisted: Persisted<Vec<CreatureGroup>>,
    clock: Arc<dyn ClockPort>,
}

impl CreatureGroups {
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>) -> Self {
        let persisted = Persisted::new(store, keys::CREATURE_GROUPS);
        let groups = persisted.load().unwrap_or_default();
        Self {
            groups,
            persisted,
            clock,
        }
    }

    pub fn create(&mut self, name: &str) -> Result<CreatureGroup, DomainError> {
        let group = CreatureGroup::new(name, self.clock.now())?;
        self.groups.push(group.clone());
        self.save();
        tracing::debug!(group_id = %group.id, name = group.name(), "Created creature group");
        Ok(group)
    }

    pub fn rename(&mut self, id: CreatureGroupId, name: &str) -> Result<(), DomainError> {
        self.group_mut(id)?.rename(name)?;
        self.save();
        Ok(())
    }

    pub fn delete(&mut self, id: CreatureGroupId) -> Result<CreatureGroup, DomainError> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| DomainError::not_found("CreatureGroup", id))?;
        let group = self.groups.remove(index);
        self.save();
        Ok(group)
    }

    /// Returns false when the creature was already a member.
    pub fn add_member(
        &mut self,
        id: CreatureGroupId,
        creature_id: CreatureId,
    ) -> Result<bool, DomainError> {
        let added = self.group_mut(id)?.add_member(creature_id);
        if added {
            self.save();
        }
        Ok(added)
    }

    /// Returns false when the creature was not a member.
    pub fn remove_member(
        &mut self,
        id: CreatureGroupId,
        creature_id: CreatureId,
    ) -> Result<bool, DomainError> {
        let removed = self.group_mut(id)?.remove_member(creature_id);
        if removed {
            self.save();
        }
        Ok(removed)
    }

    /// Drop the creature from every group. Returns how many groups changed.
    pub fn purge_creature(&mut self, creature_id: CreatureId) -> usize {
        let changed = self
            .groups
            .iter_mut()
            .map(|g| g.remove_member(creature_id))
            .filter(|removed| *removed)
            .count();
        if changed > 0 {
            self.save();
            tracing::debug!(
                creature_id = %creature_id,
                groups = changed,
                "Purged creature from groups"
            );
        }
        changed
    }

    pub fn groups_for(&self, creature_id: CreatureId) -> Vec<&CreatureGroup> {
        self.groups
            .iter()
            .filter(|g| g.contains(creature_id))
            .collect()
    }

    pub fn get(&self, id: CreatureGroupId) -> Option<&CreatureGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn list(&self) -> &[CreatureGroup] {
        &self.groups
    }

    fn group_mut(&mut self, id: CreatureGroupId) -> Result<&mut CreatureGroup, DomainError> {
        self.groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| DomainError::not_found("CreatureGroup", id))
    }

    fn save(&self) {
        self.persisted.save(&self.groups);
    }
}
