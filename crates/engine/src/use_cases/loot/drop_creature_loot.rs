//! Drop creature loot use case.
//!
//! Rolls a creature's loot table and spawns the results around its cell.

use vtt_domain::{
    CurrencyAmount, GridCell, GroundItem, GroundPayload, ItemTemplate, LootEntry, RollRange,
    TokenId,
};

use crate::entities::{CreatureCatalog, GroundItemRegistry, ItemCatalog, TokenRegistry};
use crate::infrastructure::ports::RandomPort;

use super::error::LootError;

/// Offsets tried in order when spreading item drops around the origin.
const SPREAD: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Drop creature loot use case.
///
/// Currency lands on the origin cell as one pile; each item that passes its
/// drop roll lands on a neighbouring cell.
pub struct DropCreatureLoot<'a> {
    tokens: &'a TokenRegistry,
    creatures: &'a CreatureCatalog,
    items: &'a ItemCatalog,
    ground: &'a mut GroundItemRegistry,
    random: &'a dyn RandomPort,
}

impl<'a> DropCreatureLoot<'a> {
    pub fn new(
        tokens: &'a TokenRegistry,
        creatures: &'a CreatureCatalog,
        items: &'a ItemCatalog,
        ground: &'a mut GroundItemRegistry,
        random: &'a dyn RandomPort,
    ) -> Self {
        Self {
            tokens,
            creatures,
            items,
            ground,
            random,
        }
    }

    /// Roll and spawn. Returns the spawned ground items, currency first.
    pub fn execute(
        self,
        token_id: TokenId,
        origin: GridCell,
    ) -> Result<Vec<GroundItem>, LootError> {
        let token = self
            .tokens
            .get(token_id)
            .ok_or(LootError::TokenNotFound(token_id))?;
        let creature = self
            .creatures
            .get(token.creature_id)
            .ok_or(LootError::UnknownCreature(token.creature_id))?;
        let table = &creature.loot_table;
        let source = Some(creature.name.clone());

        let mut spawned = Vec::new();

        let coins = CurrencyAmount::new(
            self.roll(table.currency.gold),
            self.roll(table.currency.silver),
            self.roll(table.currency.copper),
        );
        if !coins.is_empty() {
            spawned.push(
                self.ground
                    .spawn(GroundPayload::currency(coins), origin, source.clone()),
            );
        }

        let mut spread = SPREAD.iter().cycle();
        for entry in &table.items {
            if !self.passes_drop_roll(entry) {
                continue;
            }
            let quantity = u32::try_from(self.roll(entry.quantity)).unwrap_or(u32::MAX);
            let template = self.resolve(entry);
            let cell = spread
                .next()
                .map(|(dx, dy)| origin.offset(*dx, *dy))
                .unwrap_or(origin);
            spawned.push(self.ground.spawn(
                GroundPayload::item(template, quantity),
                cell,
                source.clone(),
            ));
        }

        tracing::info!(
            token_id = %token_id,
            creature = %creature.name,
            count = spawned.len(),
            "Creature loot dropped"
        );
        Ok(spawned)
    }

    /// Uniform roll in the inclusive range
    fn roll(&self, range: RollRange) -> u64 {
        let (min, max) = range.bounds();
        if max == 0 {
            return 0;
        }
        let min = i32::try_from(min).unwrap_or(i32::MAX);
        let max = i32::try_from(max).unwrap_or(i32::MAX);
        u64::try_from(self.random.gen_range(min, max)).unwrap_or(0)
    }

    fn passes_drop_roll(&self, entry: &LootEntry) -> bool {
        let chance = i32::from(entry.drop_chance.value());
        chance > 0 && self.random.gen_range(1, 100) <= chance
    }

    fn resolve(&self, entry: &LootEntry) -> ItemTemplate {
        self.items.get(entry.item_id).cloned().unwrap_or_else(|| {
            ItemTemplate::regular(entry.name.clone(), "misc").with_id(entry.item_id)
        })
    }
}
