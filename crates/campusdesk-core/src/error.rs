//! Error types for the CampusDesk application.

use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::issue::IssueStatus;

/// A shared error type for the entire CampusDesk application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum CampusError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before reaching the domain (empty form fields, bad attachment)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The current session may not reach the requested view
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Status change refused by the configured transition table
    #[error("Transition from '{from}' to '{to}' is not allowed")]
    InvalidTransition { from: IssueStatus, to: IssueStatus },

    /// AI gateway failure surfaced to a caller that chose not to recover
    #[error("AI gateway error: {0}")]
    Gateway(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CampusError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CampusError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CampusError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<GatewayError> for CampusError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err.to_string())
    }
}

impl From<crate::store::StoreError> for CampusError {
    fn from(err: crate::store::StoreError) -> Self {
        use crate::store::StoreError;

        match err {
            StoreError::Io(e) => Self::from(e),
            StoreError::Parse(e) => Self::from(e),
            StoreError::Lock(message) => Self::Io { message },
        }
    }
}

/// A type alias for `Result<T, CampusError>`.
pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CampusError::not_found("issue", "ISS-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: issue 'ISS-1'");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = CampusError::InvalidTransition {
            from: IssueStatus::Resolved,
            to: IssueStatus::Open,
        };
        assert!(err.is_invalid_transition());
        assert_eq!(
            err.to_string(),
            "Transition from 'Resolved' to 'Open' is not allowed"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: CampusError = json_err.into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_from_gateway_error() {
        let err: CampusError = GatewayError::EmptyResponse.into();
        assert!(matches!(err, CampusError::Gateway(_)));
    }
}
