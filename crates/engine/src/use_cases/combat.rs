//! Combat use cases.
//!
//! The token registry stores whatever it is given; clamping against the
//! creature's maximums happens here.

use vtt_domain::{CombatEvent, CombatStatePatch, ResourceKind, Token, TokenId};

use crate::entities::{CreatureCatalog, NotificationSink, TokenError, TokenRegistry};
use crate::infrastructure::ports::RandomPort;

/// Apply a signed change to one of a token's resource pools.
pub struct AdjustResource<'a> {
    tokens: &'a mut TokenRegistry,
    creatures: &'a CreatureCatalog,
    log: &'a mut dyn NotificationSink,
}

impl<'a> AdjustResource<'a> {
    pub fn new(
        tokens: &'a mut TokenRegistry,
        creatures: &'a CreatureCatalog,
        log: &'a mut dyn NotificationSink,
    ) -> Self {
        Self {
            tokens,
            creatures,
            log,
        }
    }

    /// Clamp `current + delta` into `[0, max]` and write it back.
    ///
    /// Health gains log a heal; everything else logs a hit. A change that
    /// clamps to the current value logs nothing.
    pub fn execute(
        self,
        token_id: TokenId,
        resource: ResourceKind,
        delta: i32,
        actor: &str,
    ) -> Result<Token, TokenError> {
        let token = self.tokens.require(token_id)?;
        let creature = self
            .creatures
            .get(token.creature_id)
            .ok_or(TokenError::UnknownCreature(token.creature_id))?;

        let stats = &creature.stats;
        let combat = &token.combat;
        let (current, max) = match resource {
            ResourceKind::Hp => (combat.current_hp, stats.max_hp),
            ResourceKind::Mana => (combat.current_mana, stats.max_mana),
            ResourceKind::ActionPoints => {
                (combat.current_action_points, stats.max_action_points)
            }
        };
        let next = current.saturating_add(delta).clamp(0, max.max(0));
        if next == current {
            return Ok(token.clone());
        }

        let target = creature.name.clone();
        let patch = match resource {
            ResourceKind::Hp => CombatStatePatch::hp(next),
            ResourceKind::Mana => CombatStatePatch::mana(next),
            ResourceKind::ActionPoints => CombatStatePatch::action_points(next),
        };
        let updated = self.tokens.update_combat_state(token_id, patch)?;

        let actor = actor.to_string();
        let amount = next.saturating_sub(current).saturating_abs();
        let event = if resource == ResourceKind::Hp && next > current {
            CombatEvent::CombatHeal {
                actor,
                target,
                amount,
                resource,
            }
        } else {
            CombatEvent::CombatHit {
                actor,
                target,
                amount,
                resource,
            }
        };
        self.log.post(event.into());

        tracing::debug!(
            token_id = %token_id,
            %resource,
            from = current,
            to = next,
            "Adjusted resource"
        );
        Ok(updated)
    }
}

/// Roll d20 plus the creature's initiative modifier.
pub struct RollInitiative<'a> {
    tokens: &'a TokenRegistry,
    creatures: &'a CreatureCatalog,
    random: &'a dyn RandomPort,
    log: &'a mut dyn NotificationSink,
}

impl<'a> RollInitiative<'a> {
    pub fn new(
        tokens: &'a TokenRegistry,
        creatures: &'a CreatureCatalog,
        random: &'a dyn RandomPort,
        log: &'a mut dyn NotificationSink,
    ) -> Self {
        Self {
            tokens,
            creatures,
            random,
            log,
        }
    }

    /// Returns the total.
    pub fn execute(self, token_id: TokenId) -> Result<i32, TokenError> {
        let token = self.tokens.require(token_id)?;
        let creature = self
            .creatures
            .get(token.creature_id)
            .ok_or(TokenError::UnknownCreature(token.creature_id))?;

        let roll = self.random.gen_range(1, 20);
        let modifier = creature.stats.initiative;
        let total = roll.saturating_add(modifier);

        self.log.post(
            CombatEvent::InitiativeRoll {
                creature: creature.name.clone(),
                roll,
                modifier,
                total,
            }
            .into(),
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use vtt_domain::{
        CreatureTemplate, CreatureType, DerivedStats, MapPosition, NotificationPayload,
    };

    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{ClockPort, KeyValueStore};
    use crate::infrastructure::storage::InMemoryStore;

    fn setup() -> (TokenRegistry, CreatureCatalog, TokenId) {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));
        let mut creatures = CreatureCatalog::load(store.clone(), clock);
        let troll = creatures
            .upsert(
                CreatureTemplate::new("Troll", CreatureType::Giant, Utc::now()).with_stats(
                    DerivedStats {
                        max_hp: 40,
                        max_mana: 5,
                        max_action_points: 3,
                        initiative: 2,
                        ..DerivedStats::default()
                    },
                ),
            )
            .id;
        let mut tokens = TokenRegistry::load(store);
        let token = tokens
            .place(troll, MapPosition::new(0.0, 0.0), &creatures)
            .unwrap();
        (tokens, creatures, token.id)
    }

    #[test]
    fn damage_is_clamped_at_zero_and_logged_as_a_hit() {
        let (mut tokens, creatures, id) = setup();
        let mut log: Vec<NotificationPayload> = Vec::new();

        let token = AdjustResource::new(&mut tokens, &creatures, &mut log)
            .execute(id, ResourceKind::Hp, -55, "Ayla")
            .unwrap();
        assert_eq!(token.combat.current_hp, 0);
        assert_eq!(
            log,
            vec![NotificationPayload::Combat(CombatEvent::CombatHit {
                actor: "Ayla".into(),
                target: "Troll".into(),
                amount: 40,
                resource: ResourceKind::Hp,
            })]
        );
    }

    #[test]
    fn healing_is_clamped_at_max_and_logged_as_a_heal() {
        let (mut tokens, creatures, id) = setup();
        tokens
            .update_combat_state(id, CombatStatePatch::hp(30))
            .unwrap();
        let mut log: Vec<NotificationPayload> = Vec::new();

        let token = AdjustResource::new(&mut tokens, &creatures, &mut log)
            .execute(id, ResourceKind::Hp, 25, "Cleric")
            .unwrap();
        assert_eq!(token.combat.current_hp, 40);
        assert!(matches!(
            &log[..],
            [NotificationPayload::Combat(CombatEvent::CombatHeal { amount: 10, .. })]
        ));
    }

    #[test]
    fn non_health_changes_log_as_hits() {
        let (mut tokens, creatures, id) = setup();
        let mut log: Vec<NotificationPayload> = Vec::new();

        let token = AdjustResource::new(&mut tokens, &creatures, &mut log)
            .execute(id, ResourceKind::ActionPoints, -2, "Troll")
            .unwrap();
        assert_eq!(token.combat.current_action_points, 1);
        assert!(matches!(
            &log[..],
            [NotificationPayload::Combat(CombatEvent::CombatHit {
                amount: 2,
                resource: ResourceKind::ActionPoints,
                ..
            })]
        ));
    }

    #[test]
    fn clamped_no_op_logs_nothing() {
        let (mut tokens, creatures, id) = setup();
        let mut log: Vec<NotificationPayload> = Vec::new();

        AdjustResource::new(&mut tokens, &creatures, &mut log)
            .execute(id, ResourceKind::Mana, 10, "Troll")
            .unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn when_token_missing_returns_not_found() {
        let (mut tokens, creatures, _) = setup();
        let missing = TokenId::new();
        let result = AdjustResource::new(
            &mut tokens,
            &creatures,
            &mut Vec::<NotificationPayload>::new(),
        )
        .execute(missing, ResourceKind::Hp, -1, "Ayla");
        assert_eq!(result, Err(TokenError::NotFound(missing)));
    }

    #[test]
    fn initiative_adds_the_modifier() {
        let (tokens, creatures, id) = setup();
        let mut log: Vec<NotificationPayload> = Vec::new();

        let total = RollInitiative::new(&tokens, &creatures, &FixedRandom(17), &mut log)
            .execute(id)
            .unwrap();
        assert_eq!(total, 19);
        assert!(matches!(
            &log[..],
            [NotificationPayload::Combat(CombatEvent::InitiativeRoll {
                roll: 17,
                modifier: 2,
                total: 19,
                ..
            })]
        ));
    }
}
