//! # Alias Registry
//!
//! Maps short human-readable aliases to destination URLs and resolves them
//! with strict consistency.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The alias entity, reserved aliases and the store trait
//! - **Application Layer** ([`application`]) - [`AliasRegistry`], the only place alias rules live
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, Redis and in-memory stores
//!
//! ## Guarantees
//!
//! - Aliases are 3-30 characters of `[A-Za-z0-9_-]`; destinations are absolute URLs
//! - At most one mapping per alias; the store decides uniqueness atomically
//! - Reserved aliases can never be registered or unregistered
//! - Every store call is bounded by a timeout and fails as
//!   [`RegistryError::StoreUnavailable`] instead of hanging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use alias_registry::prelude::*;
//! use alias_registry::infrastructure::persistence::InMemoryAliasStore;
//!
//! # async fn example() -> Result<(), RegistryError> {
//! let registry = AliasRegistry::new(
//!     Arc::new(InMemoryAliasStore::new()),
//!     RegistryOptions::default(),
//! );
//!
//! registry.register("exmpl", "https://example.com").await?;
//! let mapping = registry.resolve("exmpl").await?;
//! assert_eq!(mapping.destination_url, "https://example.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The bundled CLI loads its settings from environment variables via
//! [`config::Config`]; see [`bootstrap`] for how a store is selected.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use application::services::AliasRegistry;
pub use error::{RegistryError, StoreError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AliasRegistry, RegistryOptions};
    pub use crate::domain::entities::{AliasMapping, NewAliasMapping};
    pub use crate::domain::repositories::AliasStore;
    pub use crate::domain::reserved::ReservedAliases;
    pub use crate::error::{RegistryError, StoreError};
}
