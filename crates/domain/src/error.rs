//! Unified error types for the domain layer
//!
//! Every state-layer operation reports one of these kinds instead of panicking.
//! None of them is fatal: the worst outcome is a rejected mutation.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced id is absent
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Currency removal exceeds the purse's total value
    #[error("Insufficient funds: requested {requested_copper} copper, purse holds {available_copper}")]
    InsufficientFunds {
        requested_copper: u64,
        available_copper: u64,
    },

    /// Currency amounts must be strictly positive
    #[error("Invalid currency amount: {0}")]
    InvalidAmount(u64),

    /// Currency total no longer fits in a copper count
    #[error("Currency overflow: total value does not fit in a copper count")]
    CurrencyOverflow,

    /// Inventory capacity exhausted
    #[error("Inventory full: {current}/{max} entries")]
    InventoryFull { current: u32, max: u32 },

    /// Deleting a template that something still references
    #[error("Referential integrity violation: {entity_type} {id} is still referenced by {referenced_by}")]
    ReferentialIntegrity {
        entity_type: &'static str,
        id: String,
        referenced_by: &'static str,
    },

    /// Placing a token for a creature that is not in the catalog
    #[error("Unknown creature: {0}")]
    UnknownCreature(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a referential integrity error
    pub fn referenced(
        entity_type: &'static str,
        id: impl ToString,
        referenced_by: &'static str,
    ) -> Self {
        Self::ReferentialIntegrity {
            entity_type,
            id: id.to_string(),
            referenced_by,
        }
    }

    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if quantity == 0 {
    ///     return Err(DomainError::validation("Quantity must be at least 1"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
