//! Store initialization and registry wiring.
//!
//! Opens the backend selected by [`Config::store_backend`] and wraps it in an
//! [`AliasRegistry`] configured from the same settings.

use crate::application::services::AliasRegistry;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::AliasStore;
use crate::infrastructure::persistence::{InMemoryAliasStore, PgAliasStore, RedisAliasStore};

use anyhow::{Context, Result};
use std::sync::Arc;

/// Opens the alias store selected by the configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (`postgres`)
/// - Redis connection manager (`redis`)
/// - An empty process-local map (`memory`)
///
/// # Errors
///
/// Returns an error if the backend is misconfigured or cannot be reached.
pub async fn open_store(config: &Config) -> Result<Arc<dyn AliasStore>> {
    let store: Arc<dyn AliasStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PgAliasStore::connect(config).await?),
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis store")?;
            Arc::new(RedisAliasStore::connect(redis_url, &config.redis_key_prefix).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; mappings are lost on exit");
            Arc::new(InMemoryAliasStore::new())
        }
    };

    tracing::info!("Alias store ready ({})", config.store_backend);
    Ok(store)
}

/// Builds a registry over the configured store.
///
/// # Errors
///
/// See [`open_store`].
pub async fn build_registry(config: &Config) -> Result<AliasRegistry> {
    let store = open_store(config).await?;
    Ok(AliasRegistry::new(store, config.registry_options()))
}
