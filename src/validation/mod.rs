//! JSON Schema validation and atlas invariants.
//!
//! Two layers of checking:
//!
//! 1. per-record validation against the embedded draft-7 schema
//!    (`schemas/celestial-body.json`, compiled in via `include_str!`);
//! 2. atlas-wide invariants that a schema cannot express: key/identifier
//!    consistency, parent referential integrity, and the star rules.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use orrery::validate_body;
//!
//! let body = json!({
//!     "id": "earth",
//!     "name": "Земля",
//!     "name_en": "Earth",
//!     "type": "planet",
//!     "parent": "sun"
//! });
//! assert!(validate_body(&body).is_ok());
//! ```

use serde_json::Value;

use crate::models::{Atlas, BodyType};
use crate::tables::SUN_ID;

/// Validate a JSON object against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean-only variant of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

fn body_schema() -> Value {
    serde_json::from_str(include_str!("../../schemas/celestial-body.json"))
        .expect("Invalid embedded schema")
}

/// Validate one serialized record against the celestial-body schema.
pub fn validate_body(data: &Value) -> Result<(), Vec<String>> {
    validate(&body_schema(), data)
}

/// Quick check against the celestial-body schema.
pub fn is_valid_body(data: &Value) -> bool {
    is_valid(&body_schema(), data)
}

/// Check the atlas-wide invariants.
///
/// - every map key is the upper-cased form of its record's `id`;
/// - `type == star` implies no `parent`;
/// - every other record has a `parent` naming the star or another record.
///
/// Returns one message per violation; empty means the atlas is consistent.
pub fn check_atlas_invariants(atlas: &Atlas) -> Vec<String> {
    let mut errors = Vec::new();

    for (key, body) in atlas {
        if key != &body.id.to_uppercase() {
            errors.push(format!(
                "Key '{}' does not match record id '{}'",
                key, body.id
            ));
        }

        match (&body.body_type, &body.parent) {
            (BodyType::Star, Some(parent)) => {
                errors.push(format!("Star '{}' must not have a parent ('{}')", body.id, parent));
            }
            (BodyType::Star, None) => {}
            (_, None) => {
                errors.push(format!("Body '{}' has no parent", body.id));
            }
            (_, Some(parent)) => {
                if parent != SUN_ID && !atlas.contains_key(&parent.to_uppercase()) {
                    errors.push(format!(
                        "Body '{}' references unknown parent '{}'",
                        body.id, parent
                    ));
                }
            }
        }
    }

    errors
}
