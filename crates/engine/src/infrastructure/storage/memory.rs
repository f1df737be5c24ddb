//! In-memory key-value store for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::infrastructure::ports::{KeyValueStore, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = match self.entries.read() {
            Ok(entries) => entries.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::backend(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::backend(format!("lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::backend(format!("lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_then_load_returns_value() {
        let store = InMemoryStore::new();
        store.save("tokens", &json!([{"id": 1}])).unwrap();
        assert_eq!(store.load("tokens").unwrap(), Some(json!([{"id": 1}])));
        assert_eq!(store.keys(), vec!["tokens".to_string()]);
    }

    #[test]
    fn missing_key_loads_none_and_removes_cleanly() {
        let store = InMemoryStore::new();
        assert_eq!(store.load("inventory").unwrap(), None);
        store.remove("inventory").unwrap();
    }
}
