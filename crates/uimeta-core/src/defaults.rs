//! Default-value coercion for prop tables.
//!
//! The canonical pipeline keeps defaults as strings and only removes one layer
//! of quoting. IDE metadata wants typed values, so [`coerce_default_strict`]
//! additionally turns boolean and number props into JSON booleans and numbers.

use serde::{Deserialize, Serialize};

use crate::types::TypeInfo;

/// The documentation's "no default" placeholder.
pub const NO_DEFAULT: &str = "—";

const DELIMITERS: [char; 3] = ['\'', '"', '`'];

/// Coerce a raw default cell.
///
/// `None` for the placeholder or an empty cell; otherwise the trimmed value
/// with one layer of matching `'`, `"` or back-tick delimiters removed.
pub fn coerce_default(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value == NO_DEFAULT {
        return None;
    }
    Some(strip_delimiters(value).to_string())
}

fn strip_delimiters(value: &str) -> &str {
    for delimiter in DELIMITERS {
        if value.len() >= 2 && value.starts_with(delimiter) && value.ends_with(delimiter) {
            return &value[delimiter.len_utf8()..value.len() - delimiter.len_utf8()];
        }
    }
    value
}

/// A default value typed for IDE metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean-typed prop.
    Bool(bool),
    /// Number-typed prop whose default parsed as a number.
    Number(f64),
    /// Everything else, including numbers that failed to parse.
    String(String),
}

/// Coerce a raw default cell using the prop's declared type.
///
/// Boolean props become `true` only for the literal `true`; number props are
/// parsed and fall back to the string form on failure.
pub fn coerce_default_strict(raw: &str, type_info: &TypeInfo) -> Option<DefaultValue> {
    coerce_default(raw).map(|value| typed_default(value, type_info))
}

/// Type an already coerced default without touching its delimiters again.
pub fn typed_default(value: String, type_info: &TypeInfo) -> DefaultValue {
    if type_info.is_simple("boolean") {
        return DefaultValue::Bool(value == "true");
    }
    if type_info.is_simple("number") {
        return value
            .parse::<f64>()
            .map_or(DefaultValue::String(value), DefaultValue::Number);
    }
    DefaultValue::String(value)
}
