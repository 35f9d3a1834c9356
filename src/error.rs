//! Error types for the registry and its storage backends.
//!
//! [`RegistryError`] is the typed failure every registry operation returns.
//! [`StoreError`] is the narrower vocabulary spoken by
//! [`crate::domain::repositories::AliasStore`] implementations.

use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Serializable view of a [`RegistryError`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failure returned by [`crate::application::services::AliasRegistry`].
///
/// Every variant carries a human-readable message and structured details.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Malformed alias or destination URL.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The alias is reserved for system routes.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// Another mapping already owns the alias.
    #[error("{message}")]
    AliasConflict { message: String, details: Value },

    /// Nothing is registered under the alias.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store failed or did not answer within the configured timeout.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl RegistryError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::AliasConflict {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Forbidden { .. } => "forbidden",
            Self::AliasConflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// HTTP status a transport layer is expected to map this failure to.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Forbidden { .. } => 403,
            Self::AliasConflict { .. } => 409,
            Self::NotFound { .. } => 404,
            Self::StoreUnavailable { .. } => 503,
        }
    }

    /// Returns true if the caller may retry the same call with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    pub fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::Forbidden { details, .. }
            | Self::AliasConflict { details, .. }
            | Self::NotFound { details, .. }
            | Self::StoreUnavailable { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl From<ValidationErrors> for RegistryError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        RegistryError::validation("Invalid alias mapping", details)
    }
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey(alias) => RegistryError::conflict(
                "Alias already exists",
                json!({ "alias": alias }),
            ),
            StoreError::Unavailable(reason) => RegistryError::store_unavailable(
                "Alias store unavailable",
                json!({ "reason": reason }),
            ),
        }
    }
}

/// Failure reported by an alias store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The alias is already present; the insert was not applied.
    #[error("Alias already present: {0}")]
    DuplicateKey(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Unavailable(format!("Corrupt stored mapping: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_maps_to_conflict() {
        let err: RegistryError = StoreError::DuplicateKey("promo".to_string()).into();

        assert!(matches!(err, RegistryError::AliasConflict { .. }));
        assert_eq!(err.code(), "conflict");
        assert_eq!(err.status_hint(), 409);
        assert_eq!(err.details()["alias"], "promo");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unavailable_is_retryable() {
        let err: RegistryError = StoreError::Unavailable("connection reset".to_string()).into();

        assert!(matches!(err, RegistryError::StoreUnavailable { .. }));
        assert!(err.is_retryable());
        assert_eq!(err.status_hint(), 503);
        assert_eq!(err.details()["reason"], "connection reset");
    }

    #[test]
    fn test_error_info_carries_message_and_code() {
        let err = RegistryError::forbidden("Alias is reserved", json!({ "alias": "admin" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "forbidden");
        assert_eq!(info.message, "Alias is reserved");
        assert_eq!(info.details, json!({ "alias": "admin" }));
    }

    #[test]
    fn test_non_transient_errors_are_not_retryable() {
        let errors = [
            RegistryError::validation("bad", json!({})),
            RegistryError::forbidden("reserved", json!({})),
            RegistryError::conflict("taken", json!({})),
            RegistryError::not_found("missing", json!({})),
        ];

        for err in errors {
            assert!(!err.is_retryable(), "{} should not be retryable", err.code());
        }
    }
}
