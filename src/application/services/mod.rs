//! Business logic services for the application layer.

pub mod alias_registry;

pub use alias_registry::{AliasRegistry, DEFAULT_STORE_TIMEOUT, RegistryOptions};
