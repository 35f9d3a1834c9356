//! Storage trait for alias mappings.

use crate::domain::entities::{AliasMapping, NewAliasMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// Durable keyed storage of [`AliasMapping`] records.
///
/// The store is the final arbiter of alias uniqueness: [`AliasStore::put`]
/// must decide atomically, so that of two concurrent inserts for the same
/// alias exactly one succeeds. The store also owns identity generation
/// (`id`, `created_at`) and all locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasStore`] - PostgreSQL, unique index
/// - [`crate::infrastructure::persistence::RedisAliasStore`] - Redis hash, `HSETNX`
/// - [`crate::infrastructure::persistence::InMemoryAliasStore`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Inserts a new mapping and returns it with store-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the alias is already present;
    /// nothing is written in that case.
    ///
    /// Returns [`StoreError::Unavailable`] on backend errors.
    async fn put(&self, new_mapping: NewAliasMapping) -> Result<AliasMapping, StoreError>;

    /// Finds a mapping by its alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(AliasMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend errors.
    async fn get_by_alias(&self, alias: &str) -> Result<Option<AliasMapping>, StoreError>;

    /// Deletes a mapping by its alias.
    ///
    /// Returns `Ok(true)` if a mapping was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend errors.
    async fn delete_by_alias(&self, alias: &str) -> Result<bool, StoreError>;

    /// Returns every stored mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend errors.
    async fn list_all(&self) -> Result<Vec<AliasMapping>, StoreError>;

    /// Checks that the backend answers.
    async fn health_check(&self) -> bool;
}
