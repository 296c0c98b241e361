//! Builds the outgoing refresh request from a [`RefreshConfig`].
//!
//! Placeholders are substituted into the URL, every header value and the body.
//! Structured bodies are encoded as form data when the Content-Type header asks
//! for `application/x-www-form-urlencoded`, and as JSON otherwise.

use crate::models::request::find_header;
use crate::models::{RefreshBody, RefreshConfig, RefreshRequest, Variable};
use crate::variables::substitution::{substitute_variables, substitute_variables_in_object};
use crate::variables::transform::value_to_string;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

const CONTENT_TYPE: &str = "Content-Type";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const APPLICATION_JSON: &str = "application/json";

/// Builds a fully substituted request descriptor.
///
/// This never fails: URL validity and body/content-type agreement are left to
/// the transport.
///
/// # Examples
///
/// ```
/// use modhead_refresh::executor::build_refresh_request;
/// use modhead_refresh::models::{HttpMethod, RefreshBody, RefreshConfig, Variable};
/// use serde_json::json;
///
/// let body = json!({"user": "${u}"}).as_object().cloned().unwrap();
/// let config = RefreshConfig::new(HttpMethod::POST, "https://auth.example.com/token")
///     .with_header("Content-Type", "application/x-www-form-urlencoded")
///     .with_body(RefreshBody::Structured(body));
///
/// let request = build_refresh_request(&config, &[Variable::new("1", "u", "a b")]);
/// assert_eq!(request.body.as_deref(), Some("user=a+b"));
/// ```
pub fn build_refresh_request(config: &RefreshConfig, variables: &[Variable]) -> RefreshRequest {
    let url = substitute_variables(&config.url, variables);

    let mut headers: HashMap<String, String> = config
        .headers
        .as_ref()
        .map(|declared| {
            declared
                .iter()
                .map(|(name, value)| (name.clone(), substitute_variables(value, variables)))
                .collect()
        })
        .unwrap_or_default();

    let body = match &config.body {
        None => None,
        // An empty raw body means "no body"
        Some(RefreshBody::Raw(raw)) if raw.is_empty() => None,
        Some(RefreshBody::Raw(raw)) => Some(substitute_variables(raw, variables)),
        Some(RefreshBody::Structured(obj)) => {
            let substituted = substitute_variables_in_object(obj, variables);
            Some(encode_structured_body(substituted, &mut headers))
        }
    };

    log::debug!(
        "Built refresh request: {} {} ({} headers, body: {})",
        config.method,
        url,
        headers.len(),
        body.as_ref().map_or(0, String::len)
    );

    RefreshRequest {
        url,
        method: config.method,
        headers,
        body,
    }
}

/// Encodes a substituted structured body, defaulting the Content-Type to JSON.
fn encode_structured_body(
    body: Map<String, JsonValue>,
    headers: &mut HashMap<String, String>,
) -> String {
    let is_form = find_header(headers, CONTENT_TYPE)
        .map(|ct| ct.contains(FORM_URLENCODED))
        .unwrap_or(false);

    if is_form {
        return encode_form(&body);
    }

    if find_header(headers, CONTENT_TYPE).is_none() {
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    }
    JsonValue::Object(body).to_string()
}

/// Encodes the top level of an object as `application/x-www-form-urlencoded`.
///
/// Nested objects and arrays are not flattened; they are sent as JSON text.
fn encode_form(body: &Map<String, JsonValue>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in body {
        serializer.append_pair(key, &value_to_string(value));
    }
    serializer.finish()
}
