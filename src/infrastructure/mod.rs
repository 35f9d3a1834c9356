//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage trait defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL, Redis and in-memory alias stores

pub mod persistence;
