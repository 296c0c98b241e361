//! Refresh request data models.
//!
//! This module defines the HTTP method accepted by a refresh configuration and
//! the fully substituted request descriptor handed to the transport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// HTTP request method.
///
/// Only the methods a refresh configuration may declare are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP DELETE method - remove a resource
    DELETE,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Parses a method name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            other => Err(format!("Unsupported HTTP method: {}", other)),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A refresh request with every placeholder already substituted.
///
/// Produced by [`crate::executor::build_refresh_request`]. No URL validation
/// has been performed; malformed URLs surface when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Target URL.
    pub url: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Outgoing headers. Names are kept exactly as the user declared them.
    pub headers: HashMap<String, String>,

    /// Encoded request body, if any.
    pub body: Option<String>,
}

impl RefreshRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            url,
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Looks up a header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Header lookup over a plain header map.
///
/// An exact key match wins; otherwise the first case-insensitive match is used.
pub(crate) fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
        .map(String::as_str)
}
