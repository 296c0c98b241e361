//! Variable refresh error types.
//!
//! Every way a refresh can fail maps to one variant here. None of them are
//! retried; the caller keeps the previous variable value on any error.

use crate::variables::TransformError;
use thiserror::Error;

/// Errors that can occur while refreshing a variable.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The variable has no refresh configuration.
    ///
    /// Reported before any network activity.
    #[error("Variable '{0}' has no refresh configuration")]
    Configuration(String),

    /// The endpoint answered with a non-2xx status.
    ///
    /// `status_text` is the standard reason phrase for `status`, not the
    /// phrase the server sent. The response body is not inspected.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// The response body is not valid JSON.
    ///
    /// The message names the response Content-Type when one was sent.
    #[error("Failed to parse response as JSON: {0}")]
    Parse(String),

    /// The transform could not produce a value.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Connection failures, DNS resolution errors and the like.
    #[error("Network error: {0}")]
    Network(String),

    /// The transport gave up waiting for the response.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (malformed URL, invalid header, ...).
    #[error("Request build error: {0}")]
    Build(String),

    /// No variable with the given id exists in the list.
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
}

impl RefreshError {
    /// Returns the HTTP status for [`RefreshError::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            RefreshError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convert reqwest errors to RefreshError.
///
/// Maps reqwest's error kinds onto our variants the same way for every
/// transport call.
impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RefreshError::Timeout
        } else if err.is_builder() {
            RefreshError::Build(err.to_string())
        } else if err.is_connect() {
            RefreshError::Network(format!("Connection failed: {}", err))
        } else {
            RefreshError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RefreshError {
    fn from(err: serde_json::Error) -> Self {
        RefreshError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let http_err = RefreshError::Http {
            status: 401,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(http_err.to_string(), "HTTP 401: Unauthorized");
        assert_eq!(http_err.status(), Some(401));

        let config_err = RefreshError::Configuration("token".to_string());
        assert_eq!(
            config_err.to_string(),
            "Variable 'token' has no refresh configuration"
        );
        assert_eq!(config_err.status(), None);

        assert_eq!(RefreshError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_transform_error_is_transparent() {
        let err: RefreshError = TransformError::PathNotFound("data.token".to_string()).into();
        assert_eq!(err.to_string(), "Cannot find value at path \"data.token\"");
    }

    #[test]
    fn test_json_error_becomes_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: RefreshError = json_err.into();
        assert!(matches!(err, RefreshError::Parse(_)));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: &dyn std::error::Error = &RefreshError::Timeout;
        assert_eq!(format!("{}", err), "Request timed out");
    }
}
