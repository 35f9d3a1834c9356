//! Core domain entities.
//!
//! - [`AliasMapping`] - A persisted alias pointing at a destination URL
//! - [`NewAliasMapping`] - Validated input for creating a mapping

pub mod alias_mapping;

pub use alias_mapping::{AliasMapping, NewAliasMapping};
