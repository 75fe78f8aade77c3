//! Error types for FitTrack
//!
//! This module defines the error taxonomy shared by the secure session store,
//! the REST client and the screen view models, using `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

/// Main error type for FitTrack operations
///
/// The first group of variants is the client taxonomy surfaced to the user
/// (network, authentication, validation, not found, storage). The remaining
/// variants cover configuration and local I/O.
#[derive(Error, Debug)]
pub enum FittrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport or connectivity failure, or an undecodable response body
    #[error("Network error: {0}")]
    Network(String),

    /// Bad credentials
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The action needs a signed-in member (or admin) and there is none
    #[error("Login required: {0}")]
    LoginRequired(String),

    /// Missing or malformed field, detected locally or reported by the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation on a resource that no longer exists
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response from the backend
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code returned by the backend
        status: u16,
        /// Server-provided message, or a generic one
        message: String,
    },

    /// Secure store unavailable or rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FittrackError {
    /// The message shown to the user in a blocking notice.
    ///
    /// Server-provided messages are returned verbatim, without the variant
    /// prefix used by `Display`.
    pub fn user_message(&self) -> String {
        match self {
            FittrackError::Network(m)
            | FittrackError::Authentication(m)
            | FittrackError::LoginRequired(m)
            | FittrackError::Validation(m)
            | FittrackError::NotFound(m)
            | FittrackError::Storage(m)
            | FittrackError::Config(m) => m.clone(),
            FittrackError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Short title for the notice, e.g. "Login Failed"
    pub fn title(&self) -> &'static str {
        match self {
            FittrackError::Network(_) => "Network Error",
            FittrackError::Authentication(_) => "Login Failed",
            FittrackError::LoginRequired(_) => "Login Required",
            FittrackError::Validation(_) => "Validation Error",
            FittrackError::NotFound(_) => "Not Found",
            FittrackError::Storage(_) => "Storage Error",
            _ => "Error",
        }
    }
}

/// Result type for the typed client layers (store, API, view models)
pub type ClientResult<T> = std::result::Result<T, FittrackError>;

/// Result type alias for application plumbing
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let error = FittrackError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_server_error_display() {
        let error = FittrackError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "Server error (500): boom");
    }

    #[test]
    fn test_user_message_is_verbatim() {
        let error = FittrackError::Authentication("Invalid phone or password".to_string());
        assert_eq!(error.user_message(), "Invalid phone or password");
        assert_eq!(error.title(), "Login Failed");
    }

    #[test]
    fn test_login_required_notice() {
        let error = FittrackError::LoginRequired("Please log in first".to_string());
        assert_eq!(error.title(), "Login Required");
        assert_eq!(error.user_message(), "Please log in first");
    }

    #[test]
    fn test_user_message_for_server_error() {
        let error = FittrackError::Server {
            status: 502,
            message: "Bad gateway".to_string(),
        };
        assert_eq!(error.user_message(), "Bad gateway");
        assert_eq!(error.title(), "Error");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: FittrackError = json_error.into();
        assert!(matches!(error, FittrackError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: FittrackError = yaml_error.into();
        assert!(matches!(error, FittrackError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FittrackError>();
    }
}
