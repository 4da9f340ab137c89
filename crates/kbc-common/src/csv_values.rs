//! Comma separated configuration values.

use serde_json::Value;

use crate::error::{CommonError, Result};

/// Splits a comma separated string into trimmed values.
///
/// An empty string yields an empty list. Empty items between commas are
/// kept as empty strings.
///
/// # Examples
///
/// ```
/// use kbc_common::comma_separated_values_to_list;
///
/// assert_eq!(comma_separated_values_to_list("name, age ,email"), vec!["name", "age", "email"]);
/// assert!(comma_separated_values_to_list("").is_empty());
/// ```
pub fn comma_separated_values_to_list(csv_string: &str) -> Vec<String> {
    if csv_string.is_empty() {
        return Vec::new();
    }
    csv_string
        .split(',')
        .map(|part| part.trim().to_string())
        .collect()
}

/// Same as [`comma_separated_values_to_list`] for a raw configuration value.
///
/// # Errors
///
/// Returns [`CommonError::InvalidInput`] when the value is not a JSON string.
pub fn comma_separated_value_to_list(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(comma_separated_values_to_list(s)),
        other => Err(CommonError::InvalidInput {
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
