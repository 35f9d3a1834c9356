//! Process-local alias store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::domain::entities::{AliasMapping, NewAliasMapping};
use crate::domain::repositories::AliasStore;
use crate::error::StoreError;

/// An alias store kept in memory.
///
/// Mappings are lost when the process exits. Inserts take the write lock and
/// decide uniqueness through the map entry; lookups only take the read lock.
/// No lock is held across an `.await`.
///
/// # Use Cases
///
/// - Unit and integration tests
/// - Embedding the registry without external services
pub struct InMemoryAliasStore {
    mappings: RwLock<HashMap<String, AliasMapping>>,
    next_id: AtomicI64,
}

impl InMemoryAliasStore {
    pub fn new() -> Self {
        Self {
            mappings: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, AliasMapping>>, StoreError> {
        self.mappings
            .read()
            .map_err(|_| StoreError::Unavailable("In-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, AliasMapping>>, StoreError> {
        self.mappings
            .write()
            .map_err(|_| StoreError::Unavailable("In-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryAliasStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AliasStore for InMemoryAliasStore {
    async fn put(&self, new_mapping: NewAliasMapping) -> Result<AliasMapping, StoreError> {
        let mut mappings = self.write()?;

        match mappings.entry(new_mapping.alias.clone()) {
            Entry::Occupied(_) => {
                debug!("Alias {} already present", new_mapping.alias);
                Err(StoreError::DuplicateKey(new_mapping.alias))
            }
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let mapping = new_mapping.into_mapping(id, Utc::now());
                slot.insert(mapping.clone());
                debug!("Stored alias {} (id {})", mapping.alias, mapping.id);
                Ok(mapping)
            }
        }
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<AliasMapping>, StoreError> {
        Ok(self.read()?.get(alias).cloned())
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<bool, StoreError> {
        Ok(self.write()?.remove(alias).is_some())
    }

    async fn list_all(&self) -> Result<Vec<AliasMapping>, StoreError> {
        let mut mappings: Vec<AliasMapping> = self.read()?.values().cloned().collect();
        mappings.sort_by_key(|m| m.id);
        Ok(mappings)
    }

    async fn health_check(&self) -> bool {
        !self.mappings.is_poisoned()
    }
}
