//! Application layer services implementing business logic.
//!
//! Services consume the domain's storage trait and provide the API callers
//! (HTTP handlers, the admin CLI) depend on.
//!
//! # Available Services
//!
//! - [`services::alias_registry::AliasRegistry`] - Alias registration, resolution and removal

pub mod services;
