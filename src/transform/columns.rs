//! Column normalization: source-language labels → canonical identifiers.
//!
//! Exact-match lookup in [`crate::tables::COLUMN_MAP`]; labels the table
//! does not know pass through unchanged. No fuzzy matching.

use serde_json::{Map, Value};

use crate::tables::COLUMN_MAP;

/// Rename a header row to canonical identifiers.
///
/// Pure function: same-length output, unmapped labels kept as-is.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|label| {
            COLUMN_MAP
                .get(label.as_str())
                .map(|canonical| canonical.to_string())
                .unwrap_or_else(|| label.clone())
        })
        .collect()
}

/// Re-key parsed row objects from source labels to canonical identifiers.
pub fn normalize_records(records: Vec<Value>) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| match record {
            Value::Object(obj) => {
                let mut renamed = Map::new();
                for (key, value) in obj {
                    let canonical = COLUMN_MAP
                        .get(key.as_str())
                        .map(|c| c.to_string())
                        .unwrap_or(key);
                    renamed.insert(canonical, value);
                }
                Value::Object(renamed)
            }
            other => other,
        })
        .collect()
}
