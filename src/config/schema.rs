//! Configuration schema for the refresh client.
//!
//! This module defines the transport settings used when calling refresh
//! endpoints, together with their defaults and validation rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport configuration for refresh requests.
///
/// Read from the `"modhead"` key of a settings document. Missing fields fall
/// back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClientConfig {
    /// Request timeout in milliseconds.
    ///
    /// `None` leaves the transport's own default in place; refreshes add no
    /// timeout of their own. When set it must be greater than 0.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Whether to automatically follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Only used when
    /// `follow_redirects` is true.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates.
    ///
    /// **Warning:** Disabling SSL validation can expose credentials sent to
    /// the auth endpoint.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// User-Agent sent with every refresh request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RefreshClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            user_agent: default_user_agent(),
        }
    }
}

impl RefreshClientConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == Some(0) {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("userAgent must not be empty".to_string());
        }

        // max_redirects can be 0 (no redirects), so no validation needed

        Ok(())
    }

    /// Returns the configured timeout, if any.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

// Default value functions for serde

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("modhead-refresh/{}", env!("CARGO_PKG_VERSION"))
}
