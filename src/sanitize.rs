//! Field sanitization.
//!
//! Raw form values are cleaned before validation: angle brackets are dropped,
//! surrounding whitespace is trimmed and the characters `&`, `"` and `'` are
//! HTML-escaped. Fields whose schema format is a phone number, a postal code
//! or an email get an extra pass. Sanitizing an already sanitized value
//! returns it unchanged.

use crate::schema::{self, FieldFormat};
use serde_json::{Map, Value};

/// Entities produced by [`escape_html`]; an `&` that already starts one of
/// these is left alone.
const ENTITIES: [&str; 3] = ["&amp;", "&quot;", "&#x27;"];

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for (index, ch) in value.char_indices() {
        match ch {
            '&' if ENTITIES.iter().any(|e| value[index..].starts_with(e)) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Sanitize a string value for the named field.
pub fn sanitize_str(field_name: &str, value: &str) -> String {
    let stripped: String = value.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let mut sanitized = escape_html(stripped.trim());

    match schema::rule(field_name).and_then(|rule| rule.format) {
        Some(FieldFormat::FrenchPhone) => {
            sanitized.retain(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '-' | '+'));
        }
        Some(FieldFormat::PostalCode) => {
            sanitized.retain(|c| c.is_ascii_digit());
        }
        Some(FieldFormat::Email) => {
            sanitized = sanitized.to_lowercase();
        }
        _ => {}
    }

    sanitized.trim().to_string()
}

/// Sanitize one JSON value; anything but a string passes through unchanged.
pub fn sanitize_field(field_name: &str, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(field_name, s)),
        other => other.clone(),
    }
}

/// Sanitize every entry of a decoded form payload.
pub fn sanitize_payload(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .map(|(key, value)| (key.clone(), sanitize_field(key, value)))
        .collect()
}
