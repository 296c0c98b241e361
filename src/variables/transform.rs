//! Response transformation for variable refresh.
//!
//! Turns the parsed body of an auth endpoint into the new variable value. The
//! transform string picks one of three modes purely by its shape:
//!
//! | Transform                       | Mode           | Result                                  |
//! |---------------------------------|----------------|-----------------------------------------|
//! | absent or empty                 | whole response | string as-is, number as text, JSON text |
//! | `data.token`                    | dot-path       | leaf string or number, else an error    |
//! | `{token_type} ${access_token}`  | template       | markers expanded, missing paths empty   |
//!
//! Missing paths are an error in dot-path mode but silently empty in template
//! mode. Callers rely on this asymmetry, so it must not be "fixed".

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

/// Matches `{path}` and `${path}` template markers.
static TEMPLATE_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\{([^}]+)\}").expect("Failed to compile template marker regex"));

/// Errors that can occur while transforming a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Whole-response mode got a value with no sensible string form.
    #[error("Cannot convert response of type {0} to string")]
    UnconvertibleResponse(&'static str),

    /// Dot-path mode could not walk the full path, or the leaf was null.
    #[error("Cannot find value at path \"{0}\"")]
    PathNotFound(String),

    /// Dot-path mode resolved to something other than a string or number.
    #[error("Value at path \"{path}\" is not a string or number: {found}")]
    TypeMismatch { path: String, found: &'static str },
}

/// Transform mode selected from a transform string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSpec<'a> {
    /// Stringify the entire response.
    WholeResponse,
    /// A single `.`-separated path.
    DotPath(&'a str),
    /// Literal text with `{path}` / `${path}` markers.
    Template(&'a str),
}

impl<'a> TransformSpec<'a> {
    /// Classifies a transform string.
    ///
    /// # Examples
    ///
    /// ```
    /// use modhead_refresh::variables::TransformSpec;
    ///
    /// assert_eq!(TransformSpec::parse(None), TransformSpec::WholeResponse);
    /// assert_eq!(TransformSpec::parse(Some("")), TransformSpec::WholeResponse);
    /// assert_eq!(TransformSpec::parse(Some("data.token")), TransformSpec::DotPath("data.token"));
    /// assert_eq!(
    ///     TransformSpec::parse(Some("Bearer {access_token}")),
    ///     TransformSpec::Template("Bearer {access_token}")
    /// );
    /// ```
    pub fn parse(transform: Option<&'a str>) -> Self {
        match transform {
            None | Some("") => TransformSpec::WholeResponse,
            Some(t) if TEMPLATE_MARKER_REGEX.is_match(t) => TransformSpec::Template(t),
            Some(t) => TransformSpec::DotPath(t),
        }
    }
}

/// Transforms a parsed response into a variable value.
///
/// # Examples
///
/// ```
/// use modhead_refresh::variables::transform_response;
/// use serde_json::json;
///
/// let response = json!({"token_type": "Bearer", "access_token": "t"});
///
/// assert_eq!(transform_response(&response, Some("access_token")).unwrap(), "t");
/// assert_eq!(
///     transform_response(&response, Some("{token_type} {access_token}")).unwrap(),
///     "Bearer t"
/// );
/// ```
pub fn transform_response(
    response: &JsonValue,
    transform: Option<&str>,
) -> Result<String, TransformError> {
    match TransformSpec::parse(transform) {
        TransformSpec::WholeResponse => stringify_whole(response),
        TransformSpec::Template(template) => Ok(expand_template(response, template)),
        TransformSpec::DotPath(path) => extract_scalar(response, path),
    }
}

fn stringify_whole(response: &JsonValue) -> Result<String, TransformError> {
    match response {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(number_to_string(n)),
        JsonValue::Object(_) | JsonValue::Array(_) => Ok(response.to_string()),
        other => Err(TransformError::UnconvertibleResponse(json_type_name(other))),
    }
}

fn expand_template(response: &JsonValue, template: &str) -> String {
    TEMPLATE_MARKER_REGEX
        .replace_all(template, |caps: &Captures| {
            let path = caps.get(1).map_or("", |m| m.as_str().trim());
            match extract_by_path(response, path) {
                None | Some(JsonValue::Null) => String::new(),
                Some(value) => value_to_string(value),
            }
        })
        .into_owned()
}

fn extract_scalar(response: &JsonValue, path: &str) -> Result<String, TransformError> {
    match extract_by_path(response, path) {
        None | Some(JsonValue::Null) => Err(TransformError::PathNotFound(path.to_string())),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(number_to_string(n)),
        Some(other) => Err(TransformError::TypeMismatch {
            path: path.to_string(),
            found: json_type_name(other),
        }),
    }
}

/// Walks a `.`-separated path through a JSON value.
///
/// Object segments are looked up by key; array segments must be a decimal
/// index. Returns `None` as soon as a segment cannot be followed. A `null`
/// leaf is returned as `Some(Null)`; callers decide whether that counts as
/// missing.
pub fn extract_by_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = value;

    for segment in path.split('.') {
        current = match current {
            JsonValue::Object(map) => map.get(segment)?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Converts a JSON value to the text inserted into templates and form bodies.
///
/// - Strings: returned as-is (without quotes)
/// - Numbers: shortest decimal form, integral floats without a fraction
/// - Booleans, null: `true`, `false`, `null`
/// - Objects, arrays: compact JSON
pub(crate) fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => number_to_string(n),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => "null".to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 Display drops the ".0" that serde_json would print
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_modes() {
        assert_eq!(TransformSpec::parse(None), TransformSpec::WholeResponse);
        assert_eq!(TransformSpec::parse(Some("")), TransformSpec::WholeResponse);
        assert_eq!(
            TransformSpec::parse(Some("access_token")),
            TransformSpec::DotPath("access_token")
        );
        assert_eq!(
            TransformSpec::parse(Some("${a}")),
            TransformSpec::Template("${a}")
        );
        assert_eq!(
            TransformSpec::parse(Some("{a}-{b}")),
            TransformSpec::Template("{a}-{b}")
        );
        // Empty braces are not a marker
        assert_eq!(TransformSpec::parse(Some("a{}")), TransformSpec::DotPath("a{}"));
    }

    #[test]
    fn test_whole_response_string_and_number() {
        assert_eq!(transform_response(&json!("raw-token"), None).unwrap(), "raw-token");
        assert_eq!(transform_response(&json!(42), None).unwrap(), "42");
        assert_eq!(transform_response(&json!(1.5), Some("")).unwrap(), "1.5");
    }

    #[test]
    fn test_whole_response_object_serialized() {
        assert_eq!(
            transform_response(&json!({"flag": true}), None).unwrap(),
            r#"{"flag":true}"#
        );
        assert_eq!(transform_response(&json!([1, 2]), None).unwrap(), "[1,2]");
    }

    #[test]
    fn test_whole_response_unconvertible() {
        assert_eq!(
            transform_response(&json!(true), None),
            Err(TransformError::UnconvertibleResponse("boolean"))
        );
        assert_eq!(
            transform_response(&JsonValue::Null, Some("")),
            Err(TransformError::UnconvertibleResponse("null"))
        );
    }

    #[test]
    fn test_dot_path_top_level() {
        let response = json!({"access_token": "t", "expires_in": 3600});
        assert_eq!(transform_response(&response, Some("access_token")).unwrap(), "t");
        assert_eq!(transform_response(&response, Some("expires_in")).unwrap(), "3600");
    }

    #[test]
    fn test_dot_path_nested() {
        let response = json!({"data": {"token": "t", "meta": {"version": 2.0}}});
        assert_eq!(transform_response(&response, Some("data.token")).unwrap(), "t");
        assert_eq!(
            transform_response(&response, Some("data.meta.version")).unwrap(),
            "2"
        );
    }

    #[test]
    fn test_dot_path_array_index() {
        let response = json!({"items": [{"id": "first"}, {"id": "second"}]});
        assert_eq!(
            transform_response(&response, Some("items.1.id")).unwrap(),
            "second"
        );
        assert_eq!(
            transform_response(&response, Some("items.5.id")),
            Err(TransformError::PathNotFound("items.5.id".to_string()))
        );
    }

    #[test]
    fn test_dot_path_missing() {
        assert_eq!(
            transform_response(&json!({"a": 1}), Some("b")),
            Err(TransformError::PathNotFound("b".to_string()))
        );
        assert_eq!(
            transform_response(&json!({"a": "text"}), Some("a.b")),
            Err(TransformError::PathNotFound("a.b".to_string()))
        );
        assert_eq!(
            transform_response(&json!({"a": null}), Some("a")),
            Err(TransformError::PathNotFound("a".to_string()))
        );
    }

    #[test]
    fn test_dot_path_type_mismatch() {
        let err = transform_response(&json!({"data": {"token": "t"}}), Some("data")).unwrap_err();
        assert_eq!(
            err,
            TransformError::TypeMismatch {
                path: "data".to_string(),
                found: "object"
            }
        );
        assert_eq!(
            err.to_string(),
            "Value at path \"data\" is not a string or number: object"
        );

        assert!(matches!(
            transform_response(&json!({"ok": true}), Some("ok")),
            Err(TransformError::TypeMismatch { found: "boolean", .. })
        ));
    }

    #[test]
    fn test_template_mode() {
        let response = json!({"token_type": "Bearer", "access_token": "t"});
        assert_eq!(
            transform_response(&response, Some("{token_type} {access_token}")).unwrap(),
            "Bearer t"
        );
        assert_eq!(
            transform_response(&response, Some("${token_type} ${access_token}")).unwrap(),
            "Bearer t"
        );
    }

    #[test]
    fn test_template_missing_path_is_empty() {
        let response = json!({"token_type": "Bearer", "nothing": null});
        assert_eq!(
            transform_response(&response, Some("{token_type} {missing}")).unwrap(),
            "Bearer "
        );
        assert_eq!(
            transform_response(&response, Some("[{nothing}]")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_template_trims_paths_and_keeps_literals() {
        let response = json!({"data": {"token": "t", "ttl": 60, "ok": true}});
        let transform = "Token { data.token } (ttl=${data.ttl}, ok={data.ok})";
        assert_eq!(
            transform_response(&response, Some(transform)).unwrap(),
            "Token t (ttl=60, ok=true)"
        );
    }

    #[test]
    fn test_template_object_values_as_json() {
        let response = json!({"scopes": ["read", "write"]});
        assert_eq!(
            transform_response(&response, Some("scopes={scopes}")).unwrap(),
            r#"scopes=["read","write"]"#
        );
    }

    #[test]
    fn test_template_on_scalar_response() {
        assert_eq!(
            transform_response(&json!("plain"), Some("Bearer {token}")).unwrap(),
            "Bearer "
        );
    }

    #[test]
    fn test_extract_by_path() {
        let value = json!({"a": {"b": [10, {"c": "deep"}]}});
        assert_eq!(extract_by_path(&value, "a.b.0"), Some(&json!(10)));
        assert_eq!(extract_by_path(&value, "a.b.1.c"), Some(&json!("deep")));
        assert_eq!(extract_by_path(&value, "a.b.x"), None);
        assert_eq!(extract_by_path(&value, "a.b.0.c"), None);
        assert_eq!(extract_by_path(&value, ""), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("s")), "s");
        assert_eq!(value_to_string(&json!(-7)), "-7");
        assert_eq!(value_to_string(&json!(3.0)), "3");
        assert_eq!(value_to_string(&json!(false)), "false");
        assert_eq!(value_to_string(&JsonValue::Null), "null");
        assert_eq!(value_to_string(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
