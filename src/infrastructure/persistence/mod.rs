//! Alias store implementations.
//!
//! # Stores
//!
//! - [`PgAliasStore`] - PostgreSQL; uniqueness via the `alias_mappings_alias_key` index
//! - [`RedisAliasStore`] - Redis; uniqueness via `HSETNX` on a single hash
//! - [`InMemoryAliasStore`] - process-local map for tests and embedding

pub mod memory_alias_store;
pub mod pg_alias_store;
pub mod redis_alias_store;

pub use memory_alias_store::InMemoryAliasStore;
pub use pg_alias_store::PgAliasStore;
pub use redis_alias_store::RedisAliasStore;
