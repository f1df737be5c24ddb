//! Currency value objects: denominations, loose amounts, and the normalized purse.
//!
//! Conversion rates are fixed at 100 copper to the silver and 100 silver to the
//! gold. A [`CurrencyPurse`] always holds `silver < 100` and `copper < 100`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const COPPER_PER_SILVER: u64 = 100;
pub const COPPER_PER_GOLD: u64 = 10_000;

/// A coin type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Gold,
    Silver,
    Copper,
}

impl Denomination {
    pub const ALL: [Denomination; 3] = [Self::Gold, Self::Silver, Self::Copper];

    /// Value of one coin in copper
    pub fn copper_value(self) -> u64 {
        match self {
            Self::Gold => COPPER_PER_GOLD,
            Self::Silver => COPPER_PER_SILVER,
            Self::Copper => 1,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Silver => write!(f, "silver"),
            Self::Copper => write!(f, "copper"),
        }
    }
}

impl FromStr for Denomination {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" | "g" => Ok(Self::Gold),
            "silver" | "s" => Ok(Self::Silver),
            "copper" | "c" => Ok(Self::Copper),
            other => Err(DomainError::validation(format!(
                "Unknown denomination: {other}"
            ))),
        }
    }
}

/// A loose pile of coins, not normalized.
///
/// Used for loot payloads and notifications, where "150 copper" is a
/// meaningful thing to show the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub copper: u64,
}

impl CurrencyAmount {
    pub fn new(gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// A single-denomination amount
    pub fn of(denomination: Denomination, amount: u64) -> Self {
        let mut value = Self::default();
        value.set(denomination, amount);
        value
    }

    pub fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Copper => self.copper,
        }
    }

    pub fn set(&mut self, denomination: Denomination, amount: u64) {
        match denomination {
            Denomination::Gold => self.gold = amount,
            Denomination::Silver => self.silver = amount,
            Denomination::Copper => self.copper = amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.silver == 0 && self.copper == 0
    }

    /// Copper-equivalent value, or `None` when it does not fit in a `u64`
    pub fn total_copper(&self) -> Option<u64> {
        self.gold
            .checked_mul(COPPER_PER_GOLD)?
            .checked_add(self.silver.checked_mul(COPPER_PER_SILVER)?)?
            .checked_add(self.copper)
    }

    /// Non-zero denominations, gold first
    pub fn parts(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        Denomination::ALL
            .into_iter()
            .map(|d| (d, self.get(d)))
            .filter(|(_, amount)| *amount > 0)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0 copper");
        }
        let parts: Vec<String> = self
            .parts()
            .map(|(denomination, amount)| format!("{amount} {denomination}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// A character's coin holdings.
///
/// Fields are private so the sub-denomination invariant cannot be broken
/// from outside; use [`CurrencyPurse::add`] and [`CurrencyPurse::remove`].
/// The total copper value always fits in a `u64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurrencyAmount", into = "CurrencyAmount")]
pub struct CurrencyPurse {
    gold: u64,
    silver: u64,
    copper: u64,
}

impl CurrencyPurse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a purse from a total copper value
    pub fn from_copper(total: u64) -> Self {
        Self {
            gold: total / COPPER_PER_GOLD,
            silver: (total % COPPER_PER_GOLD) / COPPER_PER_SILVER,
            copper: total % COPPER_PER_SILVER,
        }
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn silver(&self) -> u64 {
        self.silver
    }

    pub fn copper(&self) -> u64 {
        self.copper
    }

    pub fn total_copper(&self) -> u64 {
        // A purse is only ever built from a total that fits
        self.gold * COPPER_PER_GOLD + self.silver * COPPER_PER_SILVER + self.copper
    }

    pub fn as_amount(&self) -> CurrencyAmount {
        CurrencyAmount::new(self.gold, self.silver, self.copper)
    }

    /// Add coins of one denomination, promoting overflow upward.
    ///
    /// All-or-nothing: a result too large to hold leaves the purse untouched.
    pub fn add(&mut self, denomination: Denomination, amount: u64) -> Result<(), DomainError> {
        if amount == 0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        let added = amount
            .checked_mul(denomination.copper_value())
            .ok_or(DomainError::CurrencyOverflow)?;
        self.credit(added)
    }

    /// Add every denomination of `amount` at once. Returns what was granted.
    pub fn add_amount(&mut self, amount: CurrencyAmount) -> Result<CurrencyAmount, DomainError> {
        let added = amount.total_copper().ok_or(DomainError::CurrencyOverflow)?;
        self.credit(added)?;
        Ok(amount)
    }

    /// Re-deriving from the new total carries copper into silver before
    /// silver into gold.
    fn credit(&mut self, copper: u64) -> Result<(), DomainError> {
        let total = self
            .total_copper()
            .checked_add(copper)
            .ok_or(DomainError::CurrencyOverflow)?;
        *self = Self::from_copper(total);
        Ok(())
    }

    /// Remove coins, borrowing across denominations.
    ///
    /// All-or-nothing: when the purse is worth less than the request the purse
    /// is left untouched.
    pub fn remove(&mut self, denomination: Denomination, amount: u64) -> Result<(), DomainError> {
        if amount == 0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        let requested = amount
            .checked_mul(denomination.copper_value())
            .ok_or(DomainError::CurrencyOverflow)?;
        let available = self.total_copper();
        if available < requested {
            return Err(DomainError::InsufficientFunds {
                requested_copper: requested,
                available_copper: available,
            });
        }
        *self = Self::from_copper(available - requested);
        Ok(())
    }
}

impl TryFrom<CurrencyAmount> for CurrencyPurse {
    type Error = DomainError;

    /// Rehydrated purses are normalized, so hand-edited storage cannot break the invariant.
    fn try_from(value: CurrencyAmount) -> Result<Self, Self::Error> {
        value
            .total_copper()
            .map(Self::from_copper)
            .ok_or(DomainError::CurrencyOverflow)
    }
}

impl From<CurrencyPurse> for CurrencyAmount {
    fn from(value: CurrencyPurse) -> Self {
        value.as_amount()
    }
}

impl fmt::Display for CurrencyPurse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g {}s {}c", self.gold, self.silver, self.copper)
    }
}
