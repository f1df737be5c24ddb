//! Application state and composition.
//!
//! `App` owns every service, built once at start-up from a single store, and
//! wires the use cases to them. Nothing here is global; callers hold the
//! `App` and pass it by reference.

use std::sync::Arc;

use vtt_domain::{
    CharacterProfile, CreatureGroupId, CreatureId, CreatureTemplate, DomainError, GridCell,
    GroundItem, GroundItemId, InstanceId, MapPosition, ResourceKind, Speaker, Token, TokenId,
};

use crate::entities::{
    CatalogError, CreatureCatalog, CreatureGroups, GroundItemRegistry, InventoryError,
    InventoryLedger, ItemCatalog, NotificationLog, TokenError, TokenRegistry,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ports::{ClockPort, KeyValueStore, RandomPort};
use crate::infrastructure::seed;
use crate::use_cases::{
    AdjustResource, AssignToGroup, DeleteCreature, DropCreatureLoot, DropToGround, LootError,
    LootGroundItem, Looted, RollInitiative, SocialFeed,
};

/// Main application state.
pub struct App {
    pub config: AppConfig,
    /// The local character; owns the inventory
    pub character: CharacterProfile,
    pub creatures: CreatureCatalog,
    pub items: ItemCatalog,
    pub tokens: TokenRegistry,
    pub groups: CreatureGroups,
    pub ground: GroundItemRegistry,
    pub inventory: InventoryLedger,
    pub notifications: NotificationLog,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

/// Counts logged at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSummary {
    pub creatures: usize,
    pub items: usize,
    pub tokens: usize,
    pub groups: usize,
    pub ground_items: usize,
    pub inventory_entries: usize,
    pub inventory_slots: u32,
    pub unread: u32,
}

impl App {
    /// Rehydrate every service from `store`.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let inventory =
            InventoryLedger::load(store.clone(), clock.clone(), config.inventory_capacity);
        let character = CharacterProfile::new(inventory.owner(), config.character_name.clone());

        Self {
            creatures: CreatureCatalog::load(store.clone(), clock.clone()),
            items: ItemCatalog::load(store.clone(), clock.clone()),
            tokens: TokenRegistry::load(store.clone()),
            groups: CreatureGroups::load(store.clone(), clock.clone()),
            ground: GroundItemRegistry::load(store.clone(), clock.clone()),
            notifications: NotificationLog::load(store, clock.clone(), config.notification_cap),
            inventory,
            character,
            config,
            random,
            clock,
        }
    }

    /// Load bundled creatures and items into empty catalogs when seeding is
    /// enabled. Returns how many records were added.
    pub fn seed_if_empty(&mut self) -> Result<usize, serde_json::Error> {
        if !self.config.seed_creatures {
            return Ok(0);
        }
        let mut added = 0;
        if self.items.is_empty() {
            added += self.items.seed_if_empty(seed::seed_items()?);
        }
        if self.creatures.is_empty() {
            added += self
                .creatures
                .seed_if_empty(seed::seed_creatures(self.clock.now())?);
        }
        Ok(added)
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            creatures: self.creatures.len(),
            items: self.items.len(),
            tokens: self.tokens.len(),
            groups: self.groups.list().len(),
            ground_items: self.ground.len(),
            inventory_entries: self.inventory.len(),
            inventory_slots: self.inventory.capacity().slots(),
            unread: self.notifications.total_unread(),
        }
    }

    // Creatures and tokens

    /// Insert or replace a creature template.
    pub fn save_creature(&mut self, creature: CreatureTemplate) -> &CreatureTemplate {
        self.creatures.upsert(creature)
    }

    pub fn place_token(
        &mut self,
        creature_id: CreatureId,
        position: MapPosition,
    ) -> Result<Token, TokenError> {
        self.tokens.place(creature_id, position, &self.creatures)
    }

    pub fn delete_creature(
        &mut self,
        creature_id: CreatureId,
    ) -> Result<CreatureTemplate, CatalogError> {
        DeleteCreature::new(&mut self.creatures, &mut self.tokens, &mut self.groups)
            .execute(creature_id)
    }

    pub fn assign_to_group(
        &mut self,
        group_id: CreatureGroupId,
        creature_id: CreatureId,
    ) -> Result<bool, DomainError> {
        AssignToGroup::new(&self.creatures, &mut self.groups).execute(group_id, creature_id)
    }

    pub fn adjust_resource(
        &mut self,
        token_id: TokenId,
        resource: ResourceKind,
        delta: i32,
    ) -> Result<Token, TokenError> {
        AdjustResource::new(&mut self.tokens, &self.creatures, &mut self.notifications).execute(
            token_id,
            resource,
            delta,
            &self.character.name,
        )
    }

    pub fn roll_initiative(&mut self, token_id: TokenId) -> Result<i32, TokenError> {
        RollInitiative::new(
            &self.tokens,
            &self.creatures,
            self.random.as_ref(),
            &mut self.notifications,
        )
        .execute(token_id)
    }

    // Loot

    pub fn drop_creature_loot(
        &mut self,
        token_id: TokenId,
        origin: GridCell,
    ) -> Result<Vec<GroundItem>, LootError> {
        DropCreatureLoot::new(
            &self.tokens,
            &self.creatures,
            &self.items,
            &mut self.ground,
            self.random.as_ref(),
        )
        .execute(token_id, origin)
    }

    /// Loot as the local character.
    pub fn loot(&mut self, ground_item_id: GroundItemId) -> Result<Looted, LootError> {
        LootGroundItem::new(
            &mut self.ground,
            &self.items,
            &mut self.inventory,
            &mut self.notifications,
        )
        .execute(ground_item_id, &self.character)
    }

    pub fn drop_to_ground(
        &mut self,
        instance_id: InstanceId,
        cell: GridCell,
    ) -> Result<GroundItem, InventoryError> {
        DropToGround::new(&mut self.inventory, &mut self.ground, &mut self.notifications).execute(
            instance_id,
            cell,
            &self.character.name,
        )
    }

    // Social

    /// Chat line from the local character.
    pub fn say(&mut self, content: &str) -> Result<(), DomainError> {
        let sender = Speaker::named(self.character.name.clone());
        SocialFeed::new(&mut self.notifications).send_message(sender, content)
    }

    pub fn whisper(&mut self, to: &str, content: &str) -> Result<(), DomainError> {
        let from = Speaker::named(self.character.name.clone());
        SocialFeed::new(&mut self.notifications).whisper(from, to, content)
    }

    pub fn system_message(&mut self, content: &str) -> Result<(), DomainError> {
        SocialFeed::new(&mut self.notifications).system(content)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;
    use vtt_domain::{NotificationCategory, NotificationPayload, SocialEvent};

    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::storage::InMemoryStore;

    const DIRE_WOLF: &str = "c7ea7000-0001-4000-8000-000000000003";

    fn build_app(store: Arc<dyn KeyValueStore>) -> App {
        App::new(
            AppConfig::default(),
            store,
            Arc::new(FixedClock(Utc::now())),
            Arc::new(FixedRandom(1)),
        )
    }

    fn dire_wolf() -> CreatureId {
        CreatureId::from_uuid(Uuid::parse_str(DIRE_WOLF).unwrap())
    }

    #[test]
    fn seeding_runs_once() {
        let mut app = build_app(Arc::new(InMemoryStore::new()));
        let added = app.seed_if_empty().unwrap();
        assert!(added > 0);
        assert_eq!(app.seed_if_empty().unwrap(), 0);
        assert!(app.creatures.contains(dire_wolf()));
    }

    #[test]
    fn seeding_can_be_disabled() {
        let config = AppConfig {
            seed_creatures: false,
            ..AppConfig::default()
        };
        let mut app = App::new(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(FixedRandom(1)),
        );
        assert_eq!(app.seed_if_empty().unwrap(), 0);
        assert!(app.creatures.is_empty());
    }

    #[test]
    fn kill_loot_and_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut app = build_app(store.clone());
        app.seed_if_empty().unwrap();

        let token = app
            .place_token(dire_wolf(), MapPosition::new(4.0, 4.0))
            .unwrap();
        app.adjust_resource(token.id, ResourceKind::Hp, -100).unwrap();
        let drops = app.drop_creature_loot(token.id, GridCell::new(4, 4)).unwrap();
        assert_eq!(drops.len(), 2);
        for drop in &drops {
            app.loot(drop.id).unwrap();
        }
        assert!(app.ground.is_empty());
        assert_eq!(app.inventory.len(), 2);
        assert_eq!(app.notifications.unread(NotificationCategory::Loot), 2);
        assert_eq!(app.notifications.unread(NotificationCategory::Combat), 1);

        let reloaded = build_app(store);
        assert_eq!(reloaded.inventory.owner(), app.inventory.owner());
        assert_eq!(reloaded.inventory.len(), 2);
        assert_eq!(
            reloaded
                .tokens
                .token_for_creature(dire_wolf())
                .map(|t| t.combat.current_hp),
            Some(0)
        );
        assert_eq!(reloaded.summary(), app.summary());
    }

    #[test]
    fn deleting_a_placed_creature_through_the_app() {
        let mut app = build_app(Arc::new(InMemoryStore::new()));
        app.seed_if_empty().unwrap();
        let pack = app.groups.create("Pack").unwrap();
        app.assign_to_group(pack.id, dire_wolf()).unwrap();
        app.place_token(dire_wolf(), MapPosition::new(0.0, 0.0))
            .unwrap();

        app.delete_creature(dire_wolf()).unwrap();
        assert!(!app.tokens.has_token_for(dire_wolf()));
        assert!(app.groups.get(pack.id).unwrap().members().is_empty());
    }

    #[test]
    fn chat_is_attributed_to_the_character() {
        let mut app = build_app(Arc::new(InMemoryStore::new()));
        app.say("Hello there").unwrap();
        let latest = app.notifications.latest(NotificationCategory::Social).unwrap();
        assert!(matches!(
            &latest.payload,
            NotificationPayload::Social(SocialEvent::Message { sender, .. })
                if sender.name == "Adventurer"
        ));
    }
}
