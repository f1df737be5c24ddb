//! Creature groups - named, ordered lists of creature ids (library categories)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CreatureGroupId, CreatureId, DomainError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureGroup {
    pub id: CreatureGroupId,
    name: String,
    #[serde(default)]
    members: Vec<CreatureId>,
    pub created_at: DateTime<Utc>,
}

impl CreatureGroup {
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        Ok(Self {
            id: CreatureGroupId::new(),
            name: validate_group_name(name)?,
            members: Vec::new(),
            created_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = validate_group_name(name)?;
        Ok(())
    }

    pub fn members(&self) -> &[CreatureId] {
        &self.members
    }

    pub fn contains(&self, creature_id: CreatureId) -> bool {
        self.members.contains(&creature_id)
    }

    /// Returns false when the creature was already a member.
    pub fn add_member(&mut self, creature_id: CreatureId) -> bool {
        if self.contains(creature_id) {
            return false;
        }
        self.members.push(creature_id);
        true
    }

    /// Returns false when the creature was not a member.
    pub fn remove_member(&mut self, creature_id: CreatureId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| *id != creature_id);
        self.members.len() != before
    }
}

fn validate_group_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Group name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
