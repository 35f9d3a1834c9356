#![allow(dead_code)]

use alias_registry::application::services::{AliasRegistry, RegistryOptions};
use alias_registry::infrastructure::persistence::InMemoryAliasStore;
use std::sync::Arc;

pub fn create_memory_registry() -> AliasRegistry<InMemoryAliasStore> {
    AliasRegistry::new(Arc::new(InMemoryAliasStore::new()), RegistryOptions::default())
}

pub async fn seed(registry: &AliasRegistry<InMemoryAliasStore>, alias: &str, url: &str) {
    registry.register(alias, url).await.unwrap();
}

pub fn aliases_of(mappings: &[alias_registry::domain::entities::AliasMapping]) -> Vec<&str> {
    mappings.iter().map(|m| m.alias.as_str()).collect()
}
