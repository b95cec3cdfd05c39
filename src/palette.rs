//! Candidate border colors
//!
//! The palette is either the user's `vscodeBorder.primaryColors` override or
//! the built-in swatches below. It is re-read on every assignment.

use serde_json::Value;
use tracing::warn;

use crate::color::is_valid_hex;

/// Built-in swatches used when no usable override is configured
pub const DEFAULT_COLORS: [&str; 11] = [
    "#E53935", // Red
    "#D81B60", // Pink
    "#8E24AA", // Purple
    "#3949AB", // Indigo
    "#1E88E5", // Blue
    "#039BE5", // Light blue
    "#00897B", // Teal
    "#43A047", // Green
    "#FDD835", // Yellow
    "#FB8C00", // Orange
    "#F4511E", // Deep orange
];

/// The built-in palette as owned strings
pub fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

/// Resolve the active palette from a raw override value.
///
/// Non-string, blank and unparseable entries are dropped. If nothing usable
/// remains (or there was no override at all) the built-in palette is used, so
/// the result is never empty.
pub fn resolve(configured: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = configured else {
        return default_colors();
    };

    let cleaned: Vec<String> = entries
        .iter()
        .filter_map(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .filter(|value| {
            let ok = is_valid_hex(value);
            if !ok {
                warn!("Ignoring invalid palette color: {}", value);
            }
            ok
        })
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        default_colors()
    } else {
        cleaned
    }
}
