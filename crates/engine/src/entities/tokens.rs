//! Token registry - creature instances on the battlefield.
//!
//! At most one token exists per creature. Placing a creature that already has
//! a token moves the existing token instead of creating a second one.

use std::collections::HashMap;
use std::sync::Arc;

use vtt_domain::{
    CombatStatePatch, CreatureId, CreatureTemplate, DomainError, MapPosition, Token, TokenId,
};

use crate::entities::catalog::{CreatureCatalog, ReferenceIndex};
use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token not found: {0}")]
    NotFound(TokenId),
    #[error("Unknown creature: {0}")]
    UnknownCreature(CreatureId),
}

impl From<TokenError> for DomainError {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::NotFound(id) => DomainError::not_found("Token", id),
            TokenError::UnknownCreature(id) => DomainError::UnknownCreature(id.to_string()),
        }
    }
}

pub struct TokenRegistry {
    tokens: Vec<Token>,
    /// creature -> token, rebuilt on load
    by_creature: HashMap<CreatureId, TokenId>,
    persisted: Persisted<Vec<Token>>,
}

impl TokenRegistry {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let persisted = Persisted::new(store, keys::TOKENS);
        let stored: Vec<Token> = persisted.load().unwrap_or_default();

        // A stored file written by an older build may hold duplicates; keep
        // the first token per creature.
        let mut tokens = Vec::with_capacity(stored.len());
        let mut by_creature = HashMap::with_capacity(stored.len());
        for token in stored {
            if by_creature.contains_key(&token.creature_id) {
                tracing::warn!(
                    token_id = %token.id,
                    creature_id = %token.creature_id,
                    "Dropping duplicate stored token"
                );
                continue;
            }
            by_creature.insert(token.creature_id, token.id);
            tokens.push(token);
        }

        Self {
            tokens,
            by_creature,
            persisted,
        }
    }

    /// Put `creature_id` on the map at `position`.
    ///
    /// An existing token for the creature is moved and returned with its
    /// combat state untouched.
    pub fn place(
        &mut self,
        creature_id: CreatureId,
        position: MapPosition,
        creatures: &CreatureCatalog,
    ) -> Result<Token, TokenError> {
        if let Some(token_id) = self.by_creature.get(&creature_id).copied() {
            let token = self.token_mut(token_id)?;
            token.position = position;
            let token = token.clone();
            self.save();
            tracing::debug!(
                token_id = %token.id,
                creature_id = %creature_id,
                %position,
                "Moved existing token"
            );
            return Ok(token);
        }

        let creature = creatures
            .get(creature_id)
            .ok_or(TokenError::UnknownCreature(creature_id))?;
        let token = self.insert(creature, position);
        tracing::info!(token_id = %token.id, creature_id = %creature_id, %position, "Placed token");
        Ok(token)
    }

    fn insert(&mut self, creature: &CreatureTemplate, position: MapPosition) -> Token {
        let token = Token::spawn(creature, position);
        self.by_creature.insert(token.creature_id, token.id);
        self.tokens.push(token.clone());
        self.save();
        token
    }

    /// Remove a token. Missing ids are a no-op.
    pub fn remove(&mut self, token_id: TokenId) -> Option<Token> {
        let index = self.tokens.iter().position(|t| t.id == token_id)?;
        let token = self.tokens.remove(index);
        self.by_creature.remove(&token.creature_id);
        self.save();
        tracing::info!(token_id = %token_id, creature_id = %token.creature_id, "Removed token");
        Some(token)
    }

    /// Remove the creature's token, if it has one.
    pub fn remove_for_creature(&mut self, creature_id: CreatureId) -> Option<Token> {
        let token_id = self.by_creature.get(&creature_id).copied()?;
        self.remove(token_id)
    }

    pub fn update_position(
        &mut self,
        token_id: TokenId,
        position: MapPosition,
    ) -> Result<Token, TokenError> {
        let token = self.token_mut(token_id)?;
        token.position = position;
        let token = token.clone();
        self.save();
        Ok(token)
    }

    /// Shallow-merge `patch` into the token's combat state. No clamping.
    pub fn update_combat_state(
        &mut self,
        token_id: TokenId,
        patch: CombatStatePatch,
    ) -> Result<Token, TokenError> {
        let token = self.token_mut(token_id)?;
        token.combat.apply(patch);
        let token = token.clone();
        self.save();
        Ok(token)
    }

    pub fn get(&self, token_id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == token_id)
    }

    pub fn require(&self, token_id: TokenId) -> Result<&Token, TokenError> {
        self.get(token_id).ok_or(TokenError::NotFound(token_id))
    }

    pub fn token_for_creature(&self, creature_id: CreatureId) -> Option<&Token> {
        let token_id = self.by_creature.get(&creature_id)?;
        self.get(*token_id)
    }

    pub fn has_token_for(&self, creature_id: CreatureId) -> bool {
        self.by_creature.contains_key(&creature_id)
    }

    pub fn list(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Remove every token from the map.
    pub fn clear(&mut self) -> usize {
        let count = self.tokens.len();
        self.tokens.clear();
        self.by_creature.clear();
        self.save();
        tracing::info!(count, "Cleared all tokens");
        count
    }

    fn token_mut(&mut self, token_id: TokenId) -> Result<&mut Token, TokenError> {
        self.tokens
            .iter_mut()
            .find(|t| t.id == token_id)
            .ok_or(TokenError::NotFound(token_id))
    }

    fn save(&self) {
        self.persisted.save(&self.tokens);
    }
}

impl ReferenceIndex<CreatureId> for TokenRegistry {
    fn referenced_by(&self, id: CreatureId) -> Option<&'static str> {
        self.has_token_for(id).then_some("token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::storage::InMemoryStore;
    use chrono::Utc;
    use vtt_domain::{CreatureType, DerivedStats};

    fn setup() -> (Arc<dyn KeyValueStore>, CreatureCatalog, CreatureTemplate) {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut creatures = CreatureCatalog::load(store.clone(), Arc::new(FixedClock(Utc::now())));
        let ogre = CreatureTemplate::new("Ogre", CreatureType::Monstrosity, Utc::now()).with_stats(
            DerivedStats {
                max_hp: 59,
                max_mana: 0,
                max_action_points: 4,
                ..DerivedStats::default()
            },
        );
        creatures.upsert(ogre.clone());
        (store, creatures, ogre)
    }

    #[test]
    fn place_seeds_combat_state_from_template() {
        let (store, creatures, ogre) = setup();
        let mut tokens = TokenRegistry::load(store);

        let token = tokens
            .place(ogre.id, MapPosition::new(3.0, 4.0), &creatures)
            .unwrap();
        assert_eq!(token.combat.current_hp, 59);
        assert_eq!(token.combat.current_action_points, 4);
        assert!(tokens.has_token_for(ogre.id));
    }

    #[test]
    fn placing_twice_moves_the_single_token() {
        let (store, creatures, ogre) = setup();
        let mut tokens = TokenRegistry::load(store);

        let first = tokens
            .place(ogre.id, MapPosition::new(1.0, 1.0), &creatures)
            .unwrap();
        tokens
            .update_combat_state(first.id, CombatStatePatch::hp(12))
            .unwrap();
        let second = tokens
            .place(ogre.id, MapPosition::new(9.0, 2.0), &creatures)
            .unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.position, MapPosition::new(9.0, 2.0));
        assert_eq!(second.combat.current_hp, 12);
    }

    #[test]
    fn when_creature_unknown_place_returns_error() {
        let (store, creatures, _) = setup();
        let mut tokens = TokenRegistry::load(store);
        let missing = CreatureId::new();

        let result = tokens.place(missing, MapPosition::new(0.0, 0.0), &creatures);
        assert_eq!(result, Err(TokenError::UnknownCreature(missing)));
        assert!(tokens.is_empty());
    }

    #[test]
    fn combat_patch_is_not_clamped() {
        let (store, creatures, ogre) = setup();
        let mut tokens = TokenRegistry::load(store);
        let token = tokens
            .place(ogre.id, MapPosition::new(0.0, 0.0), &creatures)
            .unwrap();

        let updated = tokens
            .update_combat_state(token.id, CombatStatePatch::hp(500))
            .unwrap();
        assert_eq!(updated.combat.current_hp, 500);
    }

    #[test]
    fn when_token_missing_update_returns_not_found() {
        let (store, _, _) = setup();
        let mut tokens = TokenRegistry::load(store);
        let id = TokenId::new();
        assert_eq!(
            tokens.update_position(id, MapPosition::new(1.0, 1.0)),
            Err(TokenError::NotFound(id))
        );
    }

    #[test]
    fn remove_is_a_no_op_for_missing_ids() {
        let (store, creatures, ogre) = setup();
        let mut tokens = TokenRegistry::load(store);
        let token = tokens
            .place(ogre.id, MapPosition::new(0.0, 0.0), &creatures)
            .unwrap();

        assert!(tokens.remove(TokenId::new()).is_none());
        assert!(tokens.remove(token.id).is_some());
        assert!(!tokens.has_token_for(ogre.id));
        assert!(tokens.referenced_by(ogre.id).is_none());
    }

    #[test]
    fn index_is_rebuilt_on_load() {
        let (store, creatures, ogre) = setup();
        let token = {
            let mut tokens = TokenRegistry::load(store.clone());
            tokens
                .place(ogre.id, MapPosition::new(5.0, 5.0), &creatures)
                .unwrap()
        };

        let mut reloaded = TokenRegistry::load(store);
        assert_eq!(reloaded.token_for_creature(ogre.id).map(|t| t.id), Some(token.id));

        let again = reloaded
            .place(ogre.id, MapPosition::new(6.0, 6.0), &creatures)
            .unwrap();
        assert_eq!(again.id, token.id);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let (store, creatures, ogre) = setup();
        let mut tokens = TokenRegistry::load(store);
        tokens
            .place(ogre.id, MapPosition::new(0.0, 0.0), &creatures)
            .unwrap();
        assert_eq!(tokens.clear(), 1);
        assert!(tokens.is_empty());
        assert!(!tokens.has_token_for(ogre.id));
    }
}
