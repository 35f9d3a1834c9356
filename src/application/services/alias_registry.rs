//! Alias registration, resolution and removal.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{AliasMapping, NewAliasMapping};
use crate::domain::repositories::AliasStore;
use crate::domain::reserved::ReservedAliases;
use crate::error::{RegistryError, StoreError};
use serde_json::json;
use validator::Validate;

/// Default bound on a single store round-trip.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Construction-time settings for [`AliasRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Aliases that can never be registered or unregistered.
    pub reserved: ReservedAliases,
    /// Upper bound on every store call; expiry yields
    /// [`RegistryError::StoreUnavailable`].
    pub store_timeout: Duration,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            reserved: ReservedAliases::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Business-rule layer over an [`AliasStore`].
///
/// The registry is the only place alias rules are enforced. It holds no
/// mutable state and no locks; every operation is exactly one store call,
/// bounded by [`RegistryOptions::store_timeout`]. Uniqueness is decided by
/// the store inside [`AliasStore::put`], never by a pre-check here.
///
/// The registry does not log and does not retry. Callers decide what to do
/// with a retryable [`RegistryError::StoreUnavailable`].
pub struct AliasRegistry<S: AliasStore + ?Sized = dyn AliasStore> {
    store: Arc<S>,
    options: RegistryOptions,
}

impl<S: AliasStore + ?Sized> Clone for AliasRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: AliasStore + ?Sized> AliasRegistry<S> {
    /// Creates a new registry over `store`.
    pub fn new(store: Arc<S>, options: RegistryOptions) -> Self {
        Self { store, options }
    }

    /// Returns a copy of this registry with a different store timeout.
    pub fn with_store_timeout(&self, store_timeout: Duration) -> Self {
        Self {
            store: self.store.clone(),
            options: RegistryOptions {
                reserved: self.options.reserved.clone(),
                store_timeout,
            },
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Registers `alias` to resolve to `destination_url`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Forbidden`] if the alias is reserved
    /// - [`RegistryError::Validation`] if the alias or URL is malformed
    /// - [`RegistryError::AliasConflict`] if the alias is already registered
    /// - [`RegistryError::StoreUnavailable`] on store failure or timeout
    pub async fn register(
        &self,
        alias: &str,
        destination_url: &str,
    ) -> Result<AliasMapping, RegistryError> {
        self.ensure_not_reserved(alias)?;

        let new_mapping = NewAliasMapping::new(alias, destination_url);
        new_mapping.validate()?;

        self.bounded("put", self.store.put(new_mapping)).await
    }

    /// Resolves `alias` to its current mapping.
    ///
    /// Any non-empty string is looked up verbatim; malformed aliases simply
    /// miss.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if `alias` is empty
    /// - [`RegistryError::NotFound`] if nothing is registered under `alias`
    /// - [`RegistryError::StoreUnavailable`] on store failure or timeout
    pub async fn resolve(&self, alias: &str) -> Result<AliasMapping, RegistryError> {
        if alias.is_empty() {
            return Err(RegistryError::validation(
                "Alias can't be empty",
                json!({ "alias": alias }),
            ));
        }

        self.bounded("get_by_alias", self.store.get_by_alias(alias))
            .await?
            .ok_or_else(|| RegistryError::not_found("Alias not found", json!({ "alias": alias })))
    }

    /// Removes the mapping registered under `alias`.
    ///
    /// Repeating the call after a successful removal fails with
    /// [`RegistryError::NotFound`].
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Forbidden`] if the alias is reserved
    /// - [`RegistryError::NotFound`] if nothing is registered under `alias`
    /// - [`RegistryError::StoreUnavailable`] on store failure or timeout
    pub async fn unregister(&self, alias: &str) -> Result<(), RegistryError> {
        self.ensure_not_reserved(alias)?;

        let deleted = self
            .bounded("delete_by_alias", self.store.delete_by_alias(alias))
            .await?;

        if !deleted {
            return Err(RegistryError::not_found(
                "Alias not found",
                json!({ "alias": alias }),
            ));
        }

        Ok(())
    }

    /// Returns a snapshot of every mapping, in the store's order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StoreUnavailable`] on store failure or timeout.
    pub async fn list_all(&self) -> Result<Vec<AliasMapping>, RegistryError> {
        self.bounded("list_all", self.store.list_all()).await
    }

    /// Checks whether the underlying store answers within the timeout.
    pub async fn is_store_healthy(&self) -> bool {
        tokio::time::timeout(self.options.store_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    fn ensure_not_reserved(&self, alias: &str) -> Result<(), RegistryError> {
        if self.options.reserved.contains(alias) {
            return Err(RegistryError::forbidden(
                "Alias is reserved and cannot be used or deleted",
                json!({ "alias": alias }),
            ));
        }
        Ok(())
    }

    /// Runs one store call under the configured timeout.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, RegistryError> {
        match tokio::time::timeout(self.options.store_timeout, call).await {
            Ok(result) => result.map_err(RegistryError::from),
            Err(_) => Err(RegistryError::store_unavailable(
                "Alias store did not respond in time",
                json!({
                    "operation": operation,
                    "timeout_ms": self.options.store_timeout.as_millis() as u64,
                }),
            )),
        }
    }
}
