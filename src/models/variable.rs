//! Variable data models.
//!
//! A [`Variable`] is a named value that header rules reference through
//! `${name}` placeholders. Variables carrying a [`RefreshConfig`] can obtain a
//! new value by calling an auth endpoint.
//!
//! Field names follow the stored settings blob, so a variable list can be read
//! straight out of an exported settings file:
//!
//! ```
//! use modhead_refresh::models::{HttpMethod, RefreshBody, Variable};
//!
//! let variable: Variable = serde_json::from_str(r#"{
//!     "id": "v1",
//!     "name": "token",
//!     "value": "",
//!     "isSensitive": true,
//!     "refreshConfig": {
//!         "url": "https://auth.example.com/token",
//!         "method": "POST",
//!         "body": {"client_id": "${clientId}"},
//!         "transformResponse": "{token_type} {access_token}"
//!     }
//! }"#).unwrap();
//!
//! let config = variable.refresh_config.unwrap();
//! assert_eq!(config.method, HttpMethod::POST);
//! assert!(matches!(config.body, Some(RefreshBody::Structured(_))));
//! ```

use super::request::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Text shown in place of a sensitive value.
pub const MASKED_VALUE: &str = "••••••••";

/// A named value substituted into `${name}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Stable identifier assigned by the settings layer.
    pub id: String,

    /// Name used in `${name}` placeholders.
    ///
    /// Uniqueness is enforced by whoever edits the list; when two variables
    /// share a name the first one in list order wins.
    pub name: String,

    /// Current value.
    #[serde(default)]
    pub value: String,

    /// Whether the value should be masked when displayed.
    ///
    /// This is purely cosmetic. Values are stored and transmitted in clear text.
    #[serde(default)]
    pub is_sensitive: bool,

    /// How to obtain a fresh value, if the variable is refreshable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_config: Option<RefreshConfig>,
}

impl Variable {
    /// Creates a plain, non-refreshable variable.
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
            is_sensitive: false,
            refresh_config: None,
        }
    }

    /// Marks the variable as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.is_sensitive = true;
        self
    }

    /// Attaches a refresh configuration.
    pub fn with_refresh_config(mut self, config: RefreshConfig) -> Self {
        self.refresh_config = Some(config);
        self
    }

    /// Returns the value as it should be shown to a user.
    ///
    /// Sensitive variables with a non-empty value are masked.
    pub fn display_value(&self) -> &str {
        if self.is_sensitive && !self.value.is_empty() {
            MASKED_VALUE
        } else {
            &self.value
        }
    }
}

/// HTTP call template used to refresh a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshConfig {
    /// Endpoint URL, may contain placeholders.
    pub url: String,

    /// HTTP method, `GET` when absent.
    #[serde(default)]
    pub method: HttpMethod,

    /// Header values may contain placeholders; names are used verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Request payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RefreshBody>,

    /// Response transform: empty for the whole response, a dot-path, or a
    /// template with `{path}` / `${path}` markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_response: Option<String>,
}

impl RefreshConfig {
    /// Creates a configuration with only a method and URL.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: None,
            body: None,
            transform_response: None,
        }
    }

    /// Adds a header, creating the header map if needed.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the request payload.
    pub fn with_body(mut self, body: RefreshBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the response transform.
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform_response = Some(transform.into());
        self
    }
}

/// Request payload of a refresh configuration.
///
/// Stored settings hold either a raw string or a JSON object; the untagged
/// representation reads both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefreshBody {
    /// Sent verbatim after placeholder substitution.
    Raw(String),
    /// Substituted recursively, then encoded as JSON or form data depending on
    /// the Content-Type header.
    Structured(Map<String, JsonValue>),
}

/// Returns a copy of `variables` with the value of the variable identified by
/// `id` replaced by `value`.
///
/// Every other variable is returned unchanged. An unknown id yields an
/// unchanged copy.
pub fn apply_refreshed_value(variables: &[Variable], id: &str, value: &str) -> Vec<Variable> {
    variables
        .iter()
        .map(|v| {
            if v.id == id {
                Variable {
                    value: value.to_string(),
                    ..v.clone()
                }
            } else {
                v.clone()
            }
        })
        .collect()
}
