//! Redis store tests. Run with `cargo test -- --ignored` against a server
//! reachable through `REDIS_URL` (defaults to `redis://localhost:6379`).
//!
//! Each test uses its own key prefix, so runs do not interfere.

use alias_registry::application::services::{AliasRegistry, RegistryOptions};
use alias_registry::domain::entities::NewAliasMapping;
use alias_registry::domain::repositories::AliasStore;
use alias_registry::error::{RegistryError, StoreError};
use alias_registry::infrastructure::persistence::RedisAliasStore;
use chrono::Utc;
use redis::AsyncCommands;
use std::sync::Arc;
use tokio::task::JoinSet;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

fn unique_prefix(test_name: &str) -> String {
    format!(
        "alias-test:{}:{}:",
        test_name,
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

async fn connect(test_name: &str) -> RedisAliasStore {
    RedisAliasStore::connect(&redis_url(), &unique_prefix(test_name))
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_put_and_get() {
    let store = connect("put_and_get").await;

    let created = store
        .put(NewAliasMapping::new("exmpl", "https://example.com"))
        .await
        .unwrap();
    let found = store.get_by_alias("exmpl").await.unwrap().unwrap();

    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_put_duplicate_keeps_original() {
    let store = connect("duplicate").await;

    store
        .put(NewAliasMapping::new("exmpl", "https://original.com"))
        .await
        .unwrap();
    let result = store
        .put(NewAliasMapping::new("exmpl", "https://other.com"))
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    assert_eq!(
        store
            .get_by_alias("exmpl")
            .await
            .unwrap()
            .unwrap()
            .destination_url,
        "https://original.com"
    );
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_delete_and_list() {
    let store = connect("delete_and_list").await;

    for alias in ["zeta", "alpha", "mid"] {
        store
            .put(NewAliasMapping::new(alias, "https://example.com"))
            .await
            .unwrap();
    }

    assert!(store.delete_by_alias("alpha").await.unwrap());
    assert!(!store.delete_by_alias("alpha").await.unwrap());

    let aliases: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.alias)
        .collect();

    assert_eq!(aliases, vec!["zeta", "mid"]);

    for alias in aliases {
        store.delete_by_alias(&alias).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_health_check() {
    let store = connect("health").await;

    assert!(store.health_check().await);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_corrupt_value_fails_listing() {
    let prefix = unique_prefix("corrupt");
    let store = RedisAliasStore::connect(&redis_url(), &prefix).await.unwrap();

    store
        .put(NewAliasMapping::new("good", "https://example.com"))
        .await
        .unwrap();

    let client = redis::Client::open(redis_url()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let key = format!("{}mappings", prefix);
    let _: () = conn.hset(&key, "bad", "{").await.unwrap();

    assert!(matches!(store.list_all().await, Err(StoreError::Unavailable(_))));
    assert!(matches!(store.get_by_alias("bad").await, Err(StoreError::Unavailable(_))));

    let _: () = conn.del(&key).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires REDIS_URL"]
async fn test_concurrent_register_has_one_winner() {
    let registry = AliasRegistry::new(
        Arc::new(connect("concurrent").await),
        RegistryOptions::default(),
    );
    let mut tasks = JoinSet::new();

    for i in 0..16 {
        let registry = registry.clone();
        tasks.spawn(async move {
            let url = format!("https://example.com/{}", i);
            let result = registry.register("contested", &url).await;
            (url, result)
        });
    }

    let mut winners = Vec::new();
    let mut conflicts = 0;
    while let Some(joined) = tasks.join_next().await {
        let (url, result) = joined.unwrap();
        match result {
            Ok(mapping) => winners.push((url, mapping)),
            Err(RegistryError::AliasConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, 15);

    let (winning_url, winning_mapping) = &winners[0];
    let stored = registry.resolve("contested").await.unwrap();
    assert_eq!(&stored.destination_url, winning_url);
    assert_eq!(stored.id, winning_mapping.id);

    registry.unregister("contested").await.unwrap();
}
