//! Domain models for the orrery normalization pipeline.
//!
//! - [`CelestialBody`] - one normalized output record
//! - [`BodyType`] - star / planet / dwarf planet / moon
//! - [`Atlas`] - the full output collection, keyed by upper-cased identifier
//!
//! Absent measurements stay absent: every field the spreadsheet may omit is
//! an `Option` and is skipped during serialization, never written as a
//! zero or an empty string. The one exception is atmospheric pressure,
//! which the transform defaults to 0 bar for row-derived records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The output collection: upper-cased identifier → record.
///
/// A `BTreeMap` keeps the serialized document deterministic.
pub type Atlas = BTreeMap<String, CelestialBody>;

// =============================================================================
// Body type
// =============================================================================

/// Classification of a celestial body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
}

impl BodyType {
    /// Canonical lowercase name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Planet => "planet",
            Self::DwarfPlanet => "dwarf_planet",
            Self::Moon => "moon",
        }
    }
}

// =============================================================================
// Celestial body record
// =============================================================================

/// A normalized celestial body record.
///
/// Built once per run from a source row (or hand-authored for the Sun),
/// immutable afterwards, written once into the output document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CelestialBody {
    /// Canonical lowercase identifier, unique across the atlas.
    pub id: String,

    /// Original display name (Cyrillic script preserved).
    pub name: String,

    /// Capitalized English identifier for display.
    pub name_en: String,

    /// Body classification.
    #[serde(rename = "type")]
    pub body_type: BodyType,

    /// Identifier of the body this one orbits; absent for the star.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_km: Option<f64>,

    /// Surface pressure in bar; 0 when the source cell is empty.
    /// Absent only on the hand-authored star record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmosphere_pressure_bar: Option<f64>,

    /// Rotation period in days, derived from free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_period_days: Option<f64>,

    /// Orbital period in days, derived from free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_period_days: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp_c: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp_c: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminator_temp_c: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminator_width_km: Option<f64>,

    /// Semi-major axis in AU; in km when `is_distance_km` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,

    /// Inclination to the ecliptic, degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclination: Option<f64>,

    /// Axial tilt, degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axial_tilt: Option<f64>,

    /// Marks a `semi_major_axis` expressed in km instead of AU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_distance_km: Option<bool>,

    /// Photosphere temperature in kelvin; star record only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_temp_k: Option<f64>,
}

impl CelestialBody {
    /// Create a record with identity fields set and every measurement absent.
    pub fn new(id: impl Into<String>, name: impl Into<String>, name_en: impl Into<String>, body_type: BodyType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_en: name_en.into(),
            body_type,
            parent: None,
            radius_km: None,
            diameter_km: None,
            atmosphere_pressure_bar: None,
            rotation_period_days: None,
            orbital_period_days: None,
            min_temp_c: None,
            max_temp_c: None,
            terminator_temp_c: None,
            terminator_width_km: None,
            semi_major_axis: None,
            eccentricity: None,
            inclination: None,
            axial_tilt: None,
            is_distance_km: None,
            surface_temp_k: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_serialization() {
        assert_eq!(serde_json::to_string(&BodyType::DwarfPlanet).unwrap(), "\"dwarf_planet\"");
        assert_eq!(serde_json::to_string(&BodyType::Star).unwrap(), "\"star\"");
        let parsed: BodyType = serde_json::from_str("\"moon\"").unwrap();
        assert_eq!(parsed, BodyType::Moon);
        assert_eq!(BodyType::DwarfPlanet.as_str(), "dwarf_planet");
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let body = CelestialBody::new("phobos", "Фобос", "Phobos", BodyType::Moon);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"id\":\"phobos\""));
        assert!(json.contains("\"type\":\"moon\""));
        assert!(!json.contains("radius_km"));
        assert!(!json.contains("parent"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_cyrillic_name_round_trip() {
        let mut body = CelestialBody::new("earth", "Земля", "Earth", BodyType::Planet);
        body.parent = Some("sun".into());
        body.diameter_km = Some(12742.0);
        let json = serde_json::to_string(&body).unwrap();
        // serde_json writes UTF-8 without escaping non-ASCII.
        assert!(json.contains("Земля"));
        let back: CelestialBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
