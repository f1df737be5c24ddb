//! Durable key-value storage port.

use serde_json::Value;

use super::error::StoreError;

/// One JSON document per key.
///
/// Every service writes its whole state under a single key after each
/// mutation and reads it back once at startup.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
