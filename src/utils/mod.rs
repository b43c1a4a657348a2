//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Render a JSON value as plain text for messages
///
/// Strings are returned without surrounding quotes; every other value is
/// rendered as compact JSON (`null`, `42`, `["a"]`).
pub fn json_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shorten text to at most `max_chars` characters, appending an ellipsis
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
