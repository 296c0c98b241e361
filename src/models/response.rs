//! HTTP response data model.
//!
//! The refresh flow needs the status line, the raw body and the Content-Type
//! for error reporting, so this is a much slimmer structure than a
//! general-purpose client response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response received from a refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// HTTP status code (e.g., 200, 401, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Unauthorized").
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,
}

impl RefreshResponse {
    /// Creates a new response with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        super::request::find_header(&self.headers, "content-type")
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    /// Parses the body as JSON.
    ///
    /// The body is parsed regardless of the declared Content-Type; auth
    /// endpoints frequently mislabel their payloads.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_success() {
        assert!(RefreshResponse::new(200, "OK".to_string()).is_success());
        assert!(RefreshResponse::new(204, "No Content".to_string()).is_success());
        assert!(!RefreshResponse::new(301, "Moved".to_string()).is_success());
        assert!(!RefreshResponse::new(401, "Unauthorized".to_string()).is_success());
    }

    #[test]
    fn test_content_type() {
        let mut response = RefreshResponse::new(200, "OK".to_string());
        assert_eq!(response.content_type(), None);

        response.add_header("Content-Type".to_string(), "application/json".to_string());
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_json_body() {
        let mut response = RefreshResponse::new(200, "OK".to_string());
        response.set_body(br#"{"access_token":"abc"}"#.to_vec());
        assert_eq!(response.json().unwrap(), json!({"access_token": "abc"}));

        response.set_body(b"<html>nope</html>".to_vec());
        assert!(response.json().is_err());
    }
}
