//! Storage trait definitions for the domain layer.
//!
//! [`AliasStore`] is the narrow persistence contract the registry depends on.
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.
//!
//! # Testing
//!
//! See integration tests in `tests/store_*.rs` for backend-specific usage.

pub mod alias_store;

pub use alias_store::AliasStore;

#[cfg(test)]
pub use alias_store::MockAliasStore;
