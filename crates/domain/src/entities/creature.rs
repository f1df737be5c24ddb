//! Creature templates - authored definitions that tokens are instantiated from
//!
//! A template is read-mostly: the authoring flow creates it, "edit creature"
//! replaces its fields and bumps `last_modified`, and the catalog refuses to
//! delete it while a token still points at it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CreatureId, DomainError, ItemId};

/// Broad creature classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Aberration,
    Beast,
    Celestial,
    Construct,
    Dragon,
    Elemental,
    Fey,
    Fiend,
    Giant,
    Humanoid,
    Monstrosity,
    Ooze,
    Plant,
    Undead,
    /// Unknown type for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Footprint on the battlefield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl CreatureSize {
    /// Grid cells covered along one edge
    pub fn cells(self) -> u32 {
        match self {
            Self::Tiny | Self::Small | Self::Medium => 1,
            Self::Large => 2,
            Self::Huge => 3,
            Self::Gargantuan => 4,
        }
    }
}

/// Damage categories used by resistances and vulnerabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Frost,
    Lightning,
    Poison,
    Acid,
    Necrotic,
    Radiant,
    Arcane,
    Force,
    Psychic,
    Chaos,
}

/// A whole-number percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > 100 {
            return Err(DomainError::validation(format!(
                "Percentage must be within 0..=100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Core attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub spirit: i32,
    pub charisma: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10,
            agility: 10,
            constitution: 10,
            intelligence: 10,
            spirit: 10,
            charisma: 10,
        }
    }
}

/// Combat stats derived from attributes by the authoring flow.
///
/// Tokens seed their live combat state from the `max_*` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub max_hp: i32,
    pub max_mana: i32,
    pub max_action_points: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub speed: i32,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            max_hp: 10,
            max_mana: 0,
            max_action_points: 3,
            armor_class: 10,
            initiative: 0,
            speed: 30,
        }
    }
}

/// A named ability. Content is opaque to the state layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uses: Option<String>,
}

/// Inclusive `min..=max` roll range (coin counts, item quantities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: u64,
    pub max: u64,
}

impl RollRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Bounds with `min <= max`, whatever order they were authored in
    pub fn bounds(&self) -> (u64, u64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

/// Coin ranges rolled when a creature drops loot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDrop {
    #[serde(default)]
    pub gold: RollRange,
    #[serde(default)]
    pub silver: RollRange,
    #[serde(default)]
    pub copper: RollRange,
}

/// One possible item drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootEntry {
    pub item_id: ItemId,
    /// Display name used when the item catalog has no matching template
    pub name: String,
    pub drop_chance: Percent,
    #[serde(default = "default_loot_quantity")]
    pub quantity: RollRange,
}

fn default_loot_quantity() -> RollRange {
    RollRange::new(1, 1)
}

/// What a creature can drop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    #[serde(default)]
    pub currency: CurrencyDrop,
    #[serde(default)]
    pub items: Vec<LootEntry>,
}

/// An authored creature definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureTemplate {
    pub id: CreatureId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub creature_type: CreatureType,
    #[serde(default)]
    pub size: CreatureSize,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub token_icon: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    pub stats: DerivedStats,
    #[serde(default)]
    pub resistances: BTreeMap<DamageType, Percent>,
    #[serde(default)]
    pub vulnerabilities: BTreeMap<DamageType, Percent>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub loot_table: LootTable,
    pub date_created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl CreatureTemplate {
    pub fn new(name: impl Into<String>, creature_type: CreatureType, now: DateTime<Utc>) -> Self {
        Self {
            id: CreatureId::new(),
            name: name.into(),
            description: String::new(),
            creature_type,
            size: CreatureSize::default(),
            tags: Vec::new(),
            token_icon: None,
            attributes: Attributes::default(),
            stats: DerivedStats::default(),
            resistances: BTreeMap::new(),
            vulnerabilities: BTreeMap::new(),
            abilities: Vec::new(),
            loot_table: LootTable::default(),
            date_created: now,
            last_modified: now,
        }
    }

    pub fn with_id(mut self, id: CreatureId) -> Self {
        self.id = id;
        self
    }

    pub fn with_stats(mut self, stats: DerivedStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_size(mut self, size: CreatureSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_loot_table(mut self, loot_table: LootTable) -> Self {
        self.loot_table = loot_table;
        self
    }

    pub fn with_resistance(mut self, damage: DamageType, percent: Percent) -> Self {
        self.resistances.insert(damage, percent);
        self
    }

    pub fn with_vulnerability(mut self, damage: DamageType, percent: Percent) -> Self {
        self.vulnerabilities.insert(damage, percent);
        self
    }

    /// Net damage multiplier in percent: 100 is neutral, resistances reduce it,
    /// vulnerabilities raise it.
    pub fn damage_modifier(&self, damage: DamageType) -> i32 {
        let resist = self.resistances.get(&damage).map_or(0, |p| i32::from(p.value()));
        let vulnerable = self
            .vulnerabilities
            .get(&damage)
            .map_or(0, |p| i32::from(p.value()));
        100 - resist + vulnerable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn percent_rejects_values_above_100() {
        assert!(Percent::new(100).is_ok());
        assert!(Percent::new(101).is_err());
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }

    #[test]
    fn damage_modifier_combines_resistance_and_vulnerability() {
        let creature = CreatureTemplate::new("Ghoul", CreatureType::Undead, now())
            .with_resistance(DamageType::Necrotic, Percent::new(50).unwrap())
            .with_vulnerability(DamageType::Radiant, Percent::new(25).unwrap());

        assert_eq!(creature.damage_modifier(DamageType::Necrotic), 50);
        assert_eq!(creature.damage_modifier(DamageType::Radiant), 125);
        assert_eq!(creature.damage_modifier(DamageType::Fire), 100);
    }

    #[test]
    fn template_uses_camel_case_wire_names() {
        let creature = CreatureTemplate::new("Wolf", CreatureType::Beast, now());
        let json = serde_json::to_value(&creature).unwrap();
        assert_eq!(json["type"], "beast");
        assert!(json.get("lastModified").is_some());
        assert!(json["stats"].get("maxActionPoints").is_some());
    }

    #[test]
    fn unknown_creature_type_deserializes_as_unknown() {
        let parsed: CreatureType = serde_json::from_str("\"vegetable\"").unwrap();
        assert_eq!(parsed, CreatureType::Unknown);
    }

    #[test]
    fn roll_range_bounds_are_ordered() {
        assert_eq!(RollRange::new(5, 2).bounds(), (2, 5));
        assert_eq!(RollRange::new(1, 3).bounds(), (1, 3));
    }

    #[test]
    fn loot_entry_quantity_defaults_to_one() {
        let entry: LootEntry = serde_json::from_value(serde_json::json!({
            "itemId": "00000000-0000-0000-0000-000000000001",
            "name": "Grave Axe",
            "dropChance": 60
        }))
        .unwrap();
        assert_eq!(entry.quantity, RollRange::new(1, 1));
        assert_eq!(entry.drop_chance.value(), 60);
    }
}
