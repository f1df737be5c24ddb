//! Creature library use cases.
//!
//! Deleting a creature touches three services: its token, its group
//! memberships, then the template itself.

use vtt_domain::{CreatureGroupId, CreatureId, CreatureTemplate, DomainError};

use crate::entities::{CatalogError, CreatureCatalog, CreatureGroups, TokenRegistry};

/// Delete a creature together with everything that points at it.
///
/// The only sanctioned way to delete a creature that has a token on the map;
/// a plain catalog removal refuses while the token exists.
pub struct DeleteCreature<'a> {
    creatures: &'a mut CreatureCatalog,
    tokens: &'a mut TokenRegistry,
    groups: &'a mut CreatureGroups,
}

impl<'a> DeleteCreature<'a> {
    pub fn new(
        creatures: &'a mut CreatureCatalog,
        tokens: &'a mut TokenRegistry,
        groups: &'a mut CreatureGroups,
    ) -> Self {
        Self {
            creatures,
            tokens,
            groups,
        }
    }

    /// Remove the token, purge group memberships, then drop the template.
    pub fn execute(self, creature_id: CreatureId) -> Result<CreatureTemplate, CatalogError> {
        // Fail before touching anything else
        self.creatures.require(creature_id)?;

        let token = self.tokens.remove_for_creature(creature_id);
        let groups = self.groups.purge_creature(creature_id);
        let removed = self.creatures.remove(creature_id, &*self.tokens)?;

        tracing::info!(
            creature_id = %creature_id,
            name = %removed.name,
            token_removed = token.is_some(),
            groups,
            "Creature deleted"
        );
        Ok(removed)
    }
}

/// Put an existing creature into a group.
pub struct AssignToGroup<'a> {
    creatures: &'a CreatureCatalog,
    groups: &'a mut CreatureGroups,
}

impl<'a> AssignToGroup<'a> {
    pub fn new(creatures: &'a CreatureCatalog, groups: &'a mut CreatureGroups) -> Self {
        Self { creatures, groups }
    }

    /// Returns false when the creature was already a member.
    pub fn execute(
        self,
        group_id: CreatureGroupId,
        creature_id: CreatureId,
    ) -> Result<bool, DomainError> {
        self.creatures.require(creature_id)?;
        self.groups.add_member(group_id, creature_id)
    }
}
