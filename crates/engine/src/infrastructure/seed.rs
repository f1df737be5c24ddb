//! Bundled starter content for an empty catalog.

use chrono::{DateTime, Utc};
use vtt_domain::{CreatureTemplate, ItemTemplate};

const CREATURES_JSON: &str = include_str!("seed/creatures.json");
const ITEMS_JSON: &str = include_str!("seed/items.json");

/// Starter creatures, stamped with `now`.
pub fn seed_creatures(now: DateTime<Utc>) -> Result<Vec<CreatureTemplate>, serde_json::Error> {
    let mut creatures: Vec<CreatureTemplate> = serde_json::from_str(CREATURES_JSON)?;
    for creature in &mut creatures {
        creature.date_created = now;
        creature.last_modified = now;
    }
    Ok(creatures)
}

/// Item templates referenced by the starter creatures' loot tables.
pub fn seed_items() -> Result<Vec<ItemTemplate>, serde_json::Error> {
    serde_json::from_str(ITEMS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bundled_content_parses() {
        let creatures = seed_creatures(Utc::now()).unwrap();
        let items = seed_items().unwrap();
        assert!(!creatures.is_empty());
        assert!(!items.is_empty());
    }

    #[test]
    fn seed_timestamps_use_now() {
        let now = Utc::now();
        for creature in seed_creatures(now).unwrap() {
            assert_eq!(creature.last_modified, now);
            assert_eq!(creature.date_created, now);
        }
    }

    #[test]
    fn every_loot_entry_points_at_a_seeded_item() {
        let item_ids: HashSet<_> = seed_items().unwrap().into_iter().map(|i| i.id).collect();
        for creature in seed_creatures(Utc::now()).unwrap() {
            for entry in &creature.loot_table.items {
                assert!(
                    item_ids.contains(&entry.item_id),
                    "{} drops unknown item {}",
                    creature.name,
                    entry.name
                );
            }
        }
    }

    #[test]
    fn seeded_ids_are_unique() {
        let creatures = seed_creatures(Utc::now()).unwrap();
        let ids: HashSet<_> = creatures.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), creatures.len());
    }
}
