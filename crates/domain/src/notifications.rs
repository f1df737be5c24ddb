//! Activity log entries
//!
//! Every payload belongs to exactly one category, which is fixed by the
//! variant. The presentation layer matches on these enums exhaustively; the
//! state layer only stores and counts them.
//!
//! Wire shape of an entry: `{category, type, ...payload, id, timestamp}`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CurrencyAmount, GridCell};
use crate::{DomainError, ItemBrief, NotificationId};

/// Log tab. The log opens on the social tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Loot,
    Combat,
    #[default]
    Social,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 3] = [Self::Loot, Self::Combat, Self::Social];
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loot => write!(f, "loot"),
            Self::Combat => write!(f, "combat"),
            Self::Social => write!(f, "social"),
        }
    }
}

impl FromStr for NotificationCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loot" => Ok(Self::Loot),
            "combat" => Ok(Self::Combat),
            "social" => Ok(Self::Social),
            other => Err(DomainError::validation(format!(
                "Unknown notification category: {other}"
            ))),
        }
    }
}

/// Why an entry left the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    Discarded,
    DroppedOnGround,
    Consumed,
    Sold,
}

/// Loot tab payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LootEvent {
    ItemLooted {
        item: ItemBrief,
        quantity: u32,
        looter: String,
        #[serde(default)]
        source: Option<String>,
    },
    ItemDropped {
        item: ItemBrief,
        quantity: u32,
        looter: String,
        #[serde(default)]
        source: Option<String>,
    },
    ItemRemoved {
        item: ItemBrief,
        quantity: u32,
        reason: RemovalReason,
        #[serde(default)]
        cell: Option<GridCell>,
    },
    CurrencyLooted {
        gold: u64,
        silver: u64,
        copper: u64,
        looter: String,
        #[serde(default)]
        source: Option<String>,
    },
}

impl LootEvent {
    pub fn currency_looted(
        amount: CurrencyAmount,
        looter: impl Into<String>,
        source: Option<String>,
    ) -> Self {
        Self::CurrencyLooted {
            gold: amount.gold,
            silver: amount.silver,
            copper: amount.copper,
            looter: looter.into(),
            source,
        }
    }
}

/// Which pool a combat adjustment touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Hp,
    Mana,
    ActionPoints,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hp => write!(f, "health"),
            Self::Mana => write!(f, "mana"),
            Self::ActionPoints => write!(f, "action points"),
        }
    }
}

/// Combat tab payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    /// A resource went down, or a non-health pool changed
    CombatHit {
        actor: String,
        target: String,
        amount: i32,
        resource: ResourceKind,
    },
    /// Health went up
    CombatHeal {
        actor: String,
        target: String,
        amount: i32,
        resource: ResourceKind,
    },
    InitiativeRoll {
        creature: String,
        roll: i32,
        modifier: i32,
        total: i32,
    },
}

/// Who said something
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub class: Option<String>,
}

impl Speaker {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
        }
    }
}

/// Social tab payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SocialEvent {
    Message { sender: Speaker, content: String },
    Whisper {
        from: Speaker,
        to: String,
        content: String,
    },
    System { content: String },
}

/// Any loggable payload; the variant decides the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum NotificationPayload {
    Loot(LootEvent),
    Combat(CombatEvent),
    Social(SocialEvent),
}

impl NotificationPayload {
    pub fn category(&self) -> NotificationCategory {
        match self {
            Self::Loot(_) => NotificationCategory::Loot,
            Self::Combat(_) => NotificationCategory::Combat,
            Self::Social(_) => NotificationCategory::Social,
        }
    }
}

impl From<LootEvent> for NotificationPayload {
    fn from(value: LootEvent) -> Self {
        Self::Loot(value)
    }
}

impl From<CombatEvent> for NotificationPayload {
    fn from(value: CombatEvent) -> Self {
        Self::Combat(value)
    }
}

impl From<SocialEvent> for NotificationPayload {
    fn from(value: SocialEvent) -> Self {
        Self::Social(value)
    }
}

/// A logged notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub id: NotificationId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: NotificationPayload,
}

impl NotificationEntry {
    pub fn new(payload: NotificationPayload, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            timestamp,
            payload,
        }
    }

    pub fn category(&self) -> NotificationCategory {
        self.payload.category()
    }
}
