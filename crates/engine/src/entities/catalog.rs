//! Template catalogs (creatures, items).
//!
//! Read-mostly stores keyed by id. Records keep insertion order so the
//! library shows them the way they were authored.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use vtt_domain::{CreatureId, CreatureTemplate, DomainError, ItemId, ItemTemplate};

use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::{ClockPort, KeyValueStore};

/// A record a [`Catalog`] can hold.
pub trait CatalogRecord: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + fmt::Display;

    /// Entity name used in errors and logs
    const ENTITY: &'static str;
    const STORAGE_KEY: &'static str;

    fn id(&self) -> Self::Id;

    /// Stamp the modification time, if the record tracks one.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

impl CatalogRecord for CreatureTemplate {
    type Id = CreatureId;

    const ENTITY: &'static str = "Creature";
    const STORAGE_KEY: &'static str = keys::CREATURES;

    fn id(&self) -> CreatureId {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }
}

impl CatalogRecord for ItemTemplate {
    type Id = ItemId;

    const ENTITY: &'static str = "Item";
    const STORAGE_KEY: &'static str = keys::ITEM_TEMPLATES;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// Answers whether anything still points at a catalog record.
pub trait ReferenceIndex<Id> {
    /// Name of the referring entity kind, or `None` when `id` is free to go.
    fn referenced_by(&self, id: Id) -> Option<&'static str>;
}

/// For catalogs whose records nothing refers to.
pub struct Unreferenced;

impl<Id> ReferenceIndex<Id> for Unreferenced {
    fn referenced_by(&self, _id: Id) -> Option<&'static str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },
    #[error("{entity_type} {id} is still referenced by a {referenced_by}")]
    Referenced {
        entity_type: &'static str,
        id: String,
        referenced_by: &'static str,
    },
}

impl From<CatalogError> for DomainError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound { entity_type, id } => DomainError::NotFound { entity_type, id },
            CatalogError::Referenced {
                entity_type,
                id,
                referenced_by,
            } => DomainError::ReferentialIntegrity {
                entity_type,
                id,
                referenced_by,
            },
        }
    }
}

pub struct Catalog<T: CatalogRecord> {
    records: Vec<T>,
    persisted: Persisted<Vec<T>>,
    clock: Arc<dyn ClockPort>,
}

pub type CreatureCatalog = Catalog<CreatureTemplate>;
pub type ItemCatalog = Catalog<ItemTemplate>;

impl<T: CatalogRecord> Catalog<T> {
    /// Rehydrate from storage (empty when nothing usable is stored).
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>) -> Self {
        let persisted = Persisted::new(store, T::STORAGE_KEY);
        let records = persisted.load().unwrap_or_default();
        Self {
            records,
            persisted,
            clock,
        }
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn require(&self, id: T::Id) -> Result<&T, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::NotFound {
            entity_type: T::ENTITY,
            id: id.to_string(),
        })
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or replace by id, stamping the modification time.
    pub fn upsert(&mut self, mut record: T) -> &T {
        record.touch(self.clock.now());
        let id = record.id();
        let index = match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records[index] = record;
                tracing::debug!(entity = T::ENTITY, id = %id, "Updated catalog record");
                index
            }
            None => {
                self.records.push(record);
                tracing::debug!(entity = T::ENTITY, id = %id, "Added catalog record");
                self.records.len() - 1
            }
        };
        self.persisted.save(&self.records);
        &self.records[index]
    }

    /// Delete a record nothing refers to any more.
    pub fn remove(
        &mut self,
        id: T::Id,
        references: &dyn ReferenceIndex<T::Id>,
    ) -> Result<T, CatalogError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CatalogError::NotFound {
                entity_type: T::ENTITY,
                id: id.to_string(),
            })?;

        if let Some(referenced_by) = references.referenced_by(id) {
            tracing::warn!(
                entity = T::ENTITY,
                id = %id,
                referenced_by,
                "Refusing to remove referenced record"
            );
            return Err(CatalogError::Referenced {
                entity_type: T::ENTITY,
                id: id.to_string(),
                referenced_by,
            });
        }

        let removed = self.records.remove(index);
        self.persisted.save(&self.records);
        tracing::info!(entity = T::ENTITY, id = %id, "Removed catalog record");
        Ok(removed)
    }

    /// Load starter content into an empty catalog. Returns how many records
    /// were added; a non-empty catalog is left alone.
    pub fn seed_if_empty(&mut self, records: Vec<T>) -> usize {
        if !self.records.is_empty() {
            return 0;
        }
        self.records = records;
        self.persisted.save(&self.records);
        tracing::info!(entity = T::ENTITY, count = self.records.len(), "Seeded catalog");
        self.records.len()
    }
}
