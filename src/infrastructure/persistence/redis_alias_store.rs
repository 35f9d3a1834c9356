//! Redis-backed alias store.

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::{AliasMapping, NewAliasMapping};
use crate::domain::repositories::AliasStore;
use crate::error::StoreError;
use crate::utils::masking::mask_connection_string;

/// Redis alias store.
///
/// All mappings live in one hash (`{prefix}mappings`) keyed by alias, with
/// each value holding the JSON-encoded [`AliasMapping`]. `HSETNX` is the
/// atomic uniqueness decision. Ids come from `INCR` on `{prefix}next_id`;
/// an id drawn by a losing insert is never reused.
pub struct RedisAliasStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisAliasStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - namespace for this store's keys (e.g., `"alias:"`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn mappings_key(&self) -> String {
        format!("{}mappings", self.key_prefix)
    }

    fn sequence_key(&self) -> String {
        format!("{}next_id", self.key_prefix)
    }
}

fn decode_mapping(json: &str) -> Result<AliasMapping, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Decodes hash values in id order. One unreadable value fails the whole
/// listing, the same way it fails a lookup of its alias.
fn decode_sorted(payloads: &[String]) -> Result<Vec<AliasMapping>, StoreError> {
    let mut mappings = payloads
        .iter()
        .map(|json| decode_mapping(json))
        .collect::<Result<Vec<_>, _>>()?;
    mappings.sort_by_key(|m| m.id);
    Ok(mappings)
}

#[async_trait]
impl AliasStore for RedisAliasStore {
    async fn put(&self, new_mapping: NewAliasMapping) -> Result<AliasMapping, StoreError> {
        let mut conn = self.client.clone();

        let id: i64 = conn.incr(self.sequence_key(), 1).await?;
        let mapping = new_mapping.into_mapping(id, Utc::now());
        let payload = serde_json::to_string(&mapping)?;

        let inserted: bool = conn
            .hset_nx(self.mappings_key(), &mapping.alias, payload)
            .await?;

        if !inserted {
            debug!("Alias {} already present", mapping.alias);
            return Err(StoreError::DuplicateKey(mapping.alias));
        }

        debug!("Stored alias {} (id {})", mapping.alias, mapping.id);
        Ok(mapping)
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<AliasMapping>, StoreError> {
        let mut conn = self.client.clone();

        let payload: Option<String> = conn.hget(self.mappings_key(), alias).await?;

        payload.as_deref().map(decode_mapping).transpose()
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();

        let removed: i64 = conn.hdel(self.mappings_key(), alias).await?;

        Ok(removed > 0)
    }

    async fn list_all(&self) -> Result<Vec<AliasMapping>, StoreError> {
        let mut conn = self.client.clone();

        let payloads: Vec<String> = conn.hvals(self.mappings_key()).await?;

        decode_sorted(&payloads)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: i64, alias: &str) -> String {
        let mapping =
            NewAliasMapping::new(alias, "https://example.com").into_mapping(id, Utc::now());
        serde_json::to_string(&mapping).unwrap()
    }

    #[test]
    fn test_decode_sorted_orders_by_id() {
        let payloads = vec![payload(3, "third"), payload(1, "first"), payload(2, "second")];

        let aliases: Vec<String> = decode_sorted(&payloads)
            .unwrap()
            .into_iter()
            .map(|m| m.alias)
            .collect();

        assert_eq!(aliases, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_decode_sorted_fails_on_corrupt_value() {
        let payloads = vec![payload(1, "first"), "{".to_string()];

        let result = decode_sorted(&payloads);

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_decode_mapping_fails_on_corrupt_value() {
        assert!(matches!(
            decode_mapping("not json"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
