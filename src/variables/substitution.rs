//! Placeholder substitution for refresh templates.
//!
//! Replaces `${name}` placeholders in strings and in nested JSON objects with
//! the values of the matching variables. Substitution is a single left-to-right
//! pass: text inserted from a variable value is never scanned again, so a value
//! that itself contains `${other}` is inserted literally.
//!
//! Placeholders naming an unknown variable are left in place, delimiters
//! included. Nothing in this module can fail.

use crate::models::Variable;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

const PLACEHOLDER_OPEN: &str = "${";

/// Variable values keyed by name, where the first variable with a given name wins.
struct NameIndex<'a> {
    values: HashMap<&'a str, &'a str>,
    longest_name: usize,
}

impl<'a> NameIndex<'a> {
    fn new(variables: &'a [Variable]) -> Self {
        let mut values = HashMap::with_capacity(variables.len());
        let mut longest_name = 0;
        for variable in variables {
            values
                .entry(variable.name.as_str())
                .or_insert(variable.value.as_str());
            longest_name = longest_name.max(variable.name.len());
        }
        Self {
            values,
            longest_name,
        }
    }

    /// Finds the longest known name at the start of `text` that is followed by `}`.
    ///
    /// Returns the byte length of the name and its value.
    fn longest_match(&self, text: &str) -> Option<(usize, &'a str)> {
        let mut best = None;
        for (end, _) in text.match_indices('}') {
            if end > self.longest_name {
                break;
            }
            if let Some(value) = self.values.get(&text[..end]) {
                best = Some((end, *value));
            }
        }
        best
    }
}

/// Substitutes every `${name}` placeholder in `value`.
///
/// # Examples
///
/// ```
/// use modhead_refresh::models::Variable;
/// use modhead_refresh::variables::substitute_variables;
///
/// let variables = vec![Variable::new("1", "host", "api.example.com")];
///
/// assert_eq!(
///     substitute_variables("https://${host}/token?x=${missing}", &variables),
///     "https://api.example.com/token?x=${missing}"
/// );
/// ```
pub fn substitute_variables(value: &str, variables: &[Variable]) -> String {
    // Fast path: no placeholder markers at all
    if !value.contains(PLACEHOLDER_OPEN) || variables.is_empty() {
        return value.to_string();
    }

    substitute_with_index(value, &NameIndex::new(variables))
}

/// Replaces placeholders left to right.
///
/// Names may contain any character, braces included. When several known names
/// match at the same position, the longest one wins.
fn substitute_with_index(value: &str, index: &NameIndex<'_>) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        result.push_str(&rest[..start]);
        let after = &rest[start + PLACEHOLDER_OPEN.len()..];

        match index.longest_match(after) {
            Some((name_len, resolved)) => {
                result.push_str(resolved);
                rest = &after[name_len + 1..];
            }
            None => {
                result.push_str(PLACEHOLDER_OPEN);
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Substitutes placeholders in every string field of a JSON object.
///
/// Nested objects are visited recursively and keep their shape. Arrays,
/// numbers, booleans and null are copied through untouched, including any
/// strings inside arrays. The input is not modified.
pub fn substitute_variables_in_object(
    obj: &Map<String, JsonValue>,
    variables: &[Variable],
) -> Map<String, JsonValue> {
    substitute_object_with_index(obj, &NameIndex::new(variables))
}

fn substitute_object_with_index(
    obj: &Map<String, JsonValue>,
    index: &NameIndex<'_>,
) -> Map<String, JsonValue> {
    obj.iter()
        .map(|(key, value)| {
            let substituted = match value {
                JsonValue::String(s) if s.contains(PLACEHOLDER_OPEN) => {
                    JsonValue::String(substitute_with_index(s, index))
                }
                JsonValue::Object(nested) => {
                    JsonValue::Object(substitute_object_with_index(nested, index))
                }
                other => other.clone(),
            };
            (key.clone(), substituted)
        })
        .collect()
}
