//! Submission-key normalization for the review screen.
//!
//! Cloned templates suffix field ids with a unique token, and historical
//! submissions carry that artifact in their payload keys
//! (`guestCount_169900`). The normalizer collapses those keys back to their
//! canonical form and classifies each value for display.

use serde::Serialize;
use serde_json::Value;

use crate::types::FormData;

/// Keys rendered in the submission header region instead of the field list.
const EXCLUDED_KEYS: &[&str] = &["eventType", "email", "mobileNumber"];

/// How the review screen should render one normalized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayValue {
    /// Plain string array, e.g. selected theme cards. One chip per entry.
    Chips { entries: Vec<String> },
    /// Food-menu selection flattened across categories, de-duplicated.
    ItemChips { entries: Vec<String> },
    /// Structured value with no dedicated rendering; pretty-printed JSON.
    Pretty { json: String },
    /// Scalar value rendered as plain text.
    Text { text: String },
}

/// One canonical key with its classified value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    pub key: String,
    pub value: DisplayValue,
}

/// Canonical form of a submission key: the segment before the first `_`.
/// Keys without a suffix pass through unchanged.
pub fn canonical_key(key: &str) -> &str {
    key.split_once('_').map(|(left, _)| left).unwrap_or(key)
}

/// Collapse a raw submission payload into display entries.
///
/// Keys are canonicalized, the first occurrence of each canonical key wins,
/// header keys (`eventType`, `email`, `mobileNumber`) are dropped entirely,
/// and insertion order of first-seen keys is preserved.
pub fn normalize(form_data: &FormData) -> Vec<NormalizedEntry> {
    let mut entries: Vec<NormalizedEntry> = Vec::new();
    for (key, value) in form_data {
        let canonical = canonical_key(key);
        if EXCLUDED_KEYS.contains(&canonical) {
            continue;
        }
        if entries.iter().any(|entry| entry.key == canonical) {
            continue;
        }
        entries.push(NormalizedEntry {
            key: canonical.to_string(),
            value: classify(value),
        });
    }
    entries
}

fn classify(value: &Value) -> DisplayValue {
    match value {
        Value::Array(items) if items.iter().all(Value::is_string) => DisplayValue::Chips {
            entries: items.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        },
        Value::Object(map) if is_menu_selection(map) => {
            let mut entries: Vec<String> = Vec::new();
            for items in map.values() {
                if let Value::Array(items) = items {
                    for item in items.iter().filter_map(Value::as_str) {
                        if !entries.iter().any(|existing| existing == item) {
                            entries.push(item.to_string());
                        }
                    }
                }
            }
            DisplayValue::ItemChips { entries }
        }
        Value::Array(_) | Value::Object(_) => DisplayValue::Pretty {
            json: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        },
        Value::String(text) => DisplayValue::Text { text: text.clone() },
        Value::Null => DisplayValue::Text { text: "-".to_string() },
        other => DisplayValue::Text { text: other.to_string() },
    }
}

/// A food-menu selection maps category names to arrays of item names.
fn is_menu_selection(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty()
        && map.values().all(|value| match value {
            Value::Array(items) => items.iter().all(Value::is_string),
            _ => false,
        })
}

/// Turn a camelCase machine key into a human-readable caption
/// (`guestCount` becomes `Guest Count`).
pub fn humanize_key(key: &str) -> String {
    let mut caption = String::with_capacity(key.len() + 4);
    for (index, ch) in key.chars().enumerate() {
        if index == 0 {
            caption.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            caption.push(' ');
            caption.push(ch);
        } else {
            caption.push(ch);
        }
    }
    caption
}
