//! Best-effort snapshot persistence for the stateful services.
//!
//! Each service keeps its whole state in one serde type and writes it under a
//! single storage key after every mutation. Writes never fail the mutation: the
//! in-memory state stays authoritative for the session and the failure is
//! logged.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::infrastructure::ports::KeyValueStore;

/// Storage keys, one per service.
pub mod keys {
    pub const CREATURES: &str = "creatures";
    pub const ITEM_TEMPLATES: &str = "item-templates";
    pub const TOKENS: &str = "tokens";
    pub const CREATURE_GROUPS: &str = "creature-groups";
    pub const GROUND_ITEMS: &str = "ground-items";
    pub const INVENTORY: &str = "inventory";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Typed handle on one storage key.
pub struct Persisted<S> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _state: PhantomData<fn() -> S>,
}

impl<S> Persisted<S>
where
    S: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _state: PhantomData,
        }
    }

    /// Rehydrate the stored snapshot.
    ///
    /// Returns `None` when nothing usable is stored: the key is missing, the
    /// store failed, or the payload no longer matches `S`.
    pub fn load(&self) -> Option<S> {
        let value = match self.store.load(self.key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(key = self.key, "No stored state, starting empty");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    key = self.key,
                    error = %e,
                    "Failed to load stored state, starting empty"
                );
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(
                    key = self.key,
                    error = %e,
                    "Stored state is corrupt, starting empty"
                );
                None
            }
        }
    }

    /// Write the snapshot. Failures are logged and swallowed.
    pub fn save(&self, state: &S) {
        let value = match serde_json::to_value(state) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to serialize state");
                return;
            }
        };
        if let Err(e) = self.store.save(self.key, &value) {
            tracing::warn!(key = self.key, error = %e, "Failed to persist state");
        }
    }
}
