//! Helper functions shared by the storage backends and the CLI.
//!
//! - [`db_error`] - Database error classification
//! - [`masking`] - Credential masking for log output

pub mod db_error;
pub mod masking;
