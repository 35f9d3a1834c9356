//! Domain layer containing the alias entity, the reserved-alias policy and
//! the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//! - [`reserved`] - Aliases that can never be registered or deleted
//!
//! The domain layer has no dependencies on infrastructure. Business rules are
//! enforced by [`crate::application::services::AliasRegistry`].

pub mod entities;
pub mod repositories;
pub mod reserved;
