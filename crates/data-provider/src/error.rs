//! Error types for the console data provider.

use thiserror::Error;

/// Result type alias for data provider operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Coarse classification of a failure, used by callers to decide how to
/// present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request never produced an HTTP response.
    Transport,
    /// The backend answered with a non-success status.
    Status,
    /// The backend answered, but not in the expected shape.
    Envelope,
    /// 401/403 from the backend; the session is missing or lacks rights.
    Authorization,
    /// The request could not be built from the given parameters.
    Request,
}

/// Errors that can occur while talking to the console API.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response from the backend
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// List response was neither a page nor a bare array
    #[error("the response for '{resource}' must match page<> model")]
    PageModelMismatch { resource: String },

    /// Realm-scoped resource addressed without a realm id
    #[error("resource '{resource}' requires a realm id")]
    MissingRealm { resource: String },

    /// Custom verb not offered by this console
    #[error("'{verb}' is not supported by the {console} console")]
    Unsupported { verb: String, console: String },

    /// Invalid request (missing required data, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn page_model_mismatch(resource: &str) -> Self {
        Self::PageModelMismatch {
            resource: resource.to_string(),
        }
    }

    pub fn missing_realm(resource: &str) -> Self {
        Self::MissingRealm {
            resource: resource.to_string(),
        }
    }

    pub fn unsupported(verb: &str, console: impl ToString) -> Self {
        Self::Unsupported {
            verb: verb.to_string(),
            console: console.to_string(),
        }
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify the error for presentation.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Http(_) => ErrorClass::Transport,
            Self::Api { status, .. } => match *status {
                401 | 403 => ErrorClass::Authorization,
                _ => ErrorClass::Status,
            },
            Self::Json(_) | Self::PageModelMismatch { .. } => ErrorClass::Envelope,
            Self::MissingRealm { .. }
            | Self::Unsupported { .. }
            | Self::InvalidRequest(_)
            | Self::Config(_) => ErrorClass::Request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_for_forbidden_is_authorization() {
        let err = ConsoleError::api(403, "access denied");
        assert_eq!(err.class(), ErrorClass::Authorization);
        assert_eq!(err.status_code(), Some(403));
    }

    #[test]
    fn class_for_server_error_is_status() {
        let err = ConsoleError::api(500, "boom");
        assert_eq!(err.class(), ErrorClass::Status);
    }

    #[test]
    fn page_mismatch_names_resource() {
        let err = ConsoleError::page_model_mismatch("apps");
        assert_eq!(err.class(), ErrorClass::Envelope);
        assert!(err.to_string().contains("'apps'"));
        assert_eq!(err.status_code(), None);
    }
}
