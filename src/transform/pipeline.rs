//! High-level pipeline: spreadsheet rows → normalized celestial-body atlas.
//!
//! Single-pass batch execution over one in-memory table:
//!
//! 1. parse (see [`crate::parser`])
//! 2. rename columns to canonical identifiers
//! 3. transform each row into a [`CelestialBody`]
//! 4. insert the hand-authored Sun record
//! 5. validate (schema + invariants, unless skipped)
//!
//! # Example
//!
//! ```rust,ignore
//! use orrery::{transform_csv, TransformOptions};
//! use std::path::Path;
//!
//! let result = transform_csv(Path::new("solar_system.csv"), TransformOptions::default())?;
//! println!("Normalized {} bodies", result.bodies.len());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::PipelineError;
use crate::models::{Atlas, BodyType, CelestialBody};
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};
use crate::tables::{
    DWARF_PLANET_MARKER, FOOTNOTE_SECTION_MARKER, NAME_TRANSLATIONS, ORBITAL_ELEMENTS,
    PLANET_CATEGORY, SUN_ID,
};
use crate::transform::columns::normalize_records;
use crate::transform::parent::resolve_parent;
use crate::transform::period::parse_period;
use crate::validation::{check_atlas_invariants, validate_body};

/// A digit immediately followed by a period marks a footnote row
/// embedded in the table ("1. Примечание").
static FOOTNOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\.").expect("valid regex"));

/// Options for the transformation pipeline
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Skip the schema and invariant checks
    pub skip_validation: bool,
}

/// A source row that produced no record, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub reason: String,
}

/// Source table metadata
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of a complete transformation pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Normalized records keyed by upper-cased identifier
    pub bodies: Atlas,

    /// Rows filtered out (blank names, footnotes)
    pub skipped: Vec<SkippedRow>,

    /// Records passing schema validation
    pub valid_count: usize,

    /// Records failing schema validation
    pub invalid_count: usize,

    /// Schema errors per record key
    pub validation_errors: Vec<(String, Vec<String>)>,

    /// Atlas-wide invariant violations (parent references, star rules)
    pub invariant_errors: Vec<String>,

    /// Source table metadata
    pub csv_info: CsvInfo,
}

/// Transform a spreadsheet file into the celestial-body atlas.
///
/// Main entry point: parses with auto-detection, then runs the row
/// transform and validation.
pub fn transform_csv(path: &Path, options: TransformOptions) -> Result<PipelineResult, PipelineError> {
    let parse_result = parse_csv_file_auto(path)?;
    transform_rows(parse_result, options)
}

/// Same as [`transform_csv`] but over raw bytes.
pub fn transform_bytes(bytes: &[u8], options: TransformOptions) -> Result<PipelineResult, PipelineError> {
    let parse_result = parse_bytes_auto(bytes)?;
    transform_rows(parse_result, options)
}

/// Transform already-parsed rows.
pub fn transform_rows(
    parse_result: ParseResult,
    options: TransformOptions,
) -> Result<PipelineResult, PipelineError> {
    let csv_info = CsvInfo {
        encoding: parse_result.encoding.clone(),
        delimiter: parse_result.delimiter,
        headers: parse_result.headers.clone(),
        row_count: parse_result.records.len(),
    };

    if parse_result.records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let records = normalize_records(parse_result.records);

    let mut bodies = Atlas::new();
    let mut skipped = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let row = idx + 1;

        let name = cell_str(record, "name");
        if name.is_empty() {
            skipped.push(SkippedRow {
                row,
                reason: "blank name".to_string(),
            });
            continue;
        }
        if name.contains(FOOTNOTE_SECTION_MARKER) || FOOTNOTE_RE.is_match(name) {
            skipped.push(SkippedRow {
                row,
                reason: format!("footnote row: '{name}'"),
            });
            continue;
        }

        let body = build_body(name, record);
        bodies.insert(body.id.to_uppercase(), body);
    }

    // The central star is not derived from any source row.
    bodies.insert(SUN_ID.to_uppercase(), sun_record());

    let (valid_count, invalid_count, validation_errors, invariant_errors) =
        if options.skip_validation {
            (bodies.len(), 0, Vec::new(), Vec::new())
        } else {
            validate_atlas(&bodies)?
        };

    Ok(PipelineResult {
        bodies,
        skipped,
        valid_count,
        invalid_count,
        validation_errors,
        invariant_errors,
        csv_info,
    })
}

/// Build one record from a row with canonical column identifiers.
fn build_body(name: &str, record: &Value) -> CelestialBody {
    let id = NAME_TRANSLATIONS
        .get(name)
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| name.to_lowercase());

    let raw_type = cell_str(record, "type");

    let body_type = if id == SUN_ID {
        BodyType::Star
    } else if raw_type == PLANET_CATEGORY {
        BodyType::Planet
    } else if raw_type.contains(DWARF_PLANET_MARKER) {
        BodyType::DwarfPlanet
    } else {
        BodyType::Moon
    };

    let mut body = CelestialBody::new(id.clone(), name, title_case(&id), body_type);

    body.parent = resolve_parent(raw_type).map(String::from);

    body.diameter_km = cell_number(record, "diameter_km");
    body.radius_km = body.diameter_km.map(|d| d / 2.0);

    // Empty pressure cell means a negligible atmosphere, not an unknown one.
    body.atmosphere_pressure_bar = Some(cell_number(record, "atmosphere_pressure_bar").unwrap_or(0.0));

    body.rotation_period_days = parse_period(cell_str(record, "rotation_period"));
    body.orbital_period_days = parse_period(cell_str(record, "orbital_period"));

    body.min_temp_c = cell_number(record, "min_temp_c");
    body.max_temp_c = cell_number(record, "max_temp_c");
    body.terminator_temp_c = cell_number(record, "terminator_temp_c");
    body.terminator_width_km = cell_number(record, "terminator_width_km");

    if let Some(elements) = ORBITAL_ELEMENTS.get(id.as_str()) {
        body.semi_major_axis = Some(elements.semi_major_axis);
        body.eccentricity = Some(elements.eccentricity);
        body.inclination = Some(elements.inclination);
        body.axial_tilt = Some(elements.axial_tilt);
        body.is_distance_km = elements.is_distance_km.then_some(true);
    }

    body
}

/// The hand-authored record for the central star.
///
/// Fixed literal values; the row transform, translation and period logic
/// are all bypassed.
fn sun_record() -> CelestialBody {
    let mut sun = CelestialBody::new(SUN_ID, "Солнце", "Sun", BodyType::Star);
    sun.radius_km = Some(695_700.0);
    sun.diameter_km = Some(1_391_400.0);
    sun.rotation_period_days = Some(25.38);
    sun.axial_tilt = Some(7.25);
    sun.surface_temp_k = Some(5778.0);
    sun.min_temp_c = Some(5505.0);
    sun.max_temp_c = Some(5505.0);
    sun
}

/// String view of a cell; missing and non-string cells read as "".
fn cell_str<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("").trim()
}

/// Numeric view of a cell. A blank or unparseable cell is absent, never 0.
/// Decimal commas are accepted.
fn cell_number(record: &Value, key: &str) -> Option<f64> {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.replace(',', ".").parse().ok()
        }
        _ => None,
    }
}

/// Capitalize each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Schema-validate every record and check the atlas invariants.
#[allow(clippy::type_complexity)]
fn validate_atlas(
    bodies: &Atlas,
) -> Result<(usize, usize, Vec<(String, Vec<String>)>, Vec<String>), PipelineError> {
    let mut valid = 0;
    let mut invalid = 0;
    let mut errors = Vec::new();

    for (key, body) in bodies {
        let value = serde_json::to_value(body).map_err(crate::error::TransformError::from)?;
        match validate_body(&value) {
            Ok(()) => valid += 1,
            Err(errs) => {
                invalid += 1;
                errors.push((key.clone(), errs));
            }
        }
    }

    Ok((valid, invalid, errors, check_atlas_invariants(bodies)))
}

// =============================================================================
// Serializer
// =============================================================================

/// Serialize the atlas as a pretty-printed UTF-8 JSON document.
///
/// Cyrillic text is written unescaped.
pub fn atlas_to_json(atlas: &Atlas) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(atlas)
}

/// Single whole-document write of the atlas.
pub fn write_atlas(path: &Path, atlas: &Atlas) -> Result<(), PipelineError> {
    let json = atlas_to_json(atlas).map_err(crate::error::TransformError::from)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_bytes_auto;

    const SHEET: &str = "\
Небесное тело;Тип;Диаметр (км);Атм. давление (бар);Длина суток;Орбитальный период;Мин. темп. (°C);Макс. темп. (°C)
Земля;Планета;12742;1.013;24 часа;365.25 дней;-89;57
Луна;Спутник Земли;3474.8;;27.3 суток;27.3 суток;-173;127
Марс;Планета;6779;0.006;24.6 часа;687 дней;-153;20
Фобос;Спутник Марса;22.5;;7.7 часов;7.7 часов;;
Плутон;Карликовая планета;2376.6;0.00001;153.3 часа;248 лет;-233;-223
1. Примечание;;;;;;;
;Планета;;;;;;
";

    fn run(sheet: &str) -> PipelineResult {
        let parsed = parse_bytes_auto(sheet.as_bytes()).unwrap();
        transform_rows(parsed, TransformOptions::default()).unwrap()
    }

    #[test]
    fn test_row_derived_records() {
        let result = run(SHEET);

        let earth = &result.bodies["EARTH"];
        assert_eq!(earth.id, "earth");
        assert_eq!(earth.name, "Земля");
        assert_eq!(earth.name_en, "Earth");
        assert_eq!(earth.body_type, BodyType::Planet);
        assert_eq!(earth.parent.as_deref(), Some("sun"));
        assert_eq!(earth.diameter_km, Some(12742.0));
        assert_eq!(earth.radius_km, Some(6371.0));
        assert_eq!(earth.rotation_period_days, Some(1.0));
        assert_eq!(earth.orbital_period_days, Some(365.25));
        assert_eq!(earth.min_temp_c, Some(-89.0));
    }

    #[test]
    fn test_moon_classification_and_parent() {
        let result = run(SHEET);

        let moon = &result.bodies["MOON"];
        assert_eq!(moon.body_type, BodyType::Moon);
        assert_eq!(moon.parent.as_deref(), Some("earth"));

        let phobos = &result.bodies["PHOBOS"];
        assert_eq!(phobos.parent.as_deref(), Some("mars"));
        assert_eq!(phobos.radius_km, Some(11.25));
    }

    #[test]
    fn test_dwarf_planet_classification() {
        let result = run(SHEET);

        let pluto = &result.bodies["PLUTO"];
        assert_eq!(pluto.body_type, BodyType::DwarfPlanet);
        assert_eq!(pluto.parent.as_deref(), Some("sun"));
        assert_eq!(pluto.orbital_period_days, Some(248.0 * 365.25));
    }

    #[test]
    fn test_pressure_defaults_to_zero() {
        let result = run(SHEET);

        assert_eq!(result.bodies["MOON"].atmosphere_pressure_bar, Some(0.0));
        assert_eq!(result.bodies["EARTH"].atmosphere_pressure_bar, Some(1.013));
    }

    #[test]
    fn test_missing_temperature_stays_absent() {
        let result = run(SHEET);
        assert_eq!(result.bodies["PHOBOS"].min_temp_c, None);
    }

    #[test]
    fn test_orbital_elements_merged() {
        let result = run(SHEET);

        let earth = &result.bodies["EARTH"];
        assert_eq!(earth.semi_major_axis, Some(1.000001018));
        assert_eq!(earth.axial_tilt, Some(23.4392811));
        assert_eq!(earth.is_distance_km, None);

        let moon = &result.bodies["MOON"];
        assert_eq!(moon.semi_major_axis, Some(384400.0));
        assert_eq!(moon.is_distance_km, Some(true));

        // Phobos has no reference-table entry.
        assert_eq!(result.bodies["PHOBOS"].semi_major_axis, None);
    }

    #[test]
    fn test_footnote_and_blank_rows_filtered() {
        let result = run(SHEET);

        assert!(!result.bodies.keys().any(|k| k.contains("ПРИМЕЧАНИЕ")));
        assert_eq!(result.skipped.len(), 2);
        assert!(result.skipped.iter().any(|s| s.reason.contains("footnote")));
        assert!(result.skipped.iter().any(|s| s.reason == "blank name"));
    }

    #[test]
    fn test_sun_record_is_hand_authored() {
        let result = run(SHEET);

        let sun = &result.bodies["SUN"];
        assert_eq!(sun.id, "sun");
        assert_eq!(sun.name, "Солнце");
        assert_eq!(sun.body_type, BodyType::Star);
        assert_eq!(sun.parent, None);
        // The halving rule does not apply: both literals are authored.
        assert_eq!(sun.diameter_km, Some(1_391_400.0));
        assert_eq!(sun.radius_km, Some(695_700.0));
        assert_eq!(sun.surface_temp_k, Some(5778.0));
        assert_eq!(sun.atmosphere_pressure_bar, None);
    }

    #[test]
    fn test_untranslated_name_falls_back() {
        let sheet = "\
Небесное тело;Тип
Sedna;Карликовая планета
";
        let result = run(sheet);
        let sedna = &result.bodies["SEDNA"];
        assert_eq!(sedna.id, "sedna");
        assert_eq!(sedna.name, "Sedna");
        assert_eq!(sedna.name_en, "Sedna");
        assert_eq!(sedna.parent.as_deref(), Some("sun"));
    }

    #[test]
    fn test_validation_passes_on_clean_sheet() {
        let result = run(SHEET);
        assert_eq!(result.invalid_count, 0);
        assert_eq!(result.valid_count, result.bodies.len());
        assert!(result.invariant_errors.is_empty());
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let parsed = parse_bytes_auto("Небесное тело;Тип\n".as_bytes()).unwrap();
        let result = transform_rows(parsed, TransformOptions::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn test_round_trip() {
        let result = run(SHEET);
        let json = atlas_to_json(&result.bodies).unwrap();

        assert!(json.contains("Земля"));
        assert!(!json.contains("\\u"));

        let back: Atlas = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result.bodies);
    }

    #[test]
    fn test_write_atlas() {
        let result = run(SHEET);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("celestial_bodies.json");

        write_atlas(&path, &result.bodies).unwrap();

        let back: Atlas = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.len(), result.bodies.len());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("moon"), "Moon");
        assert_eq!(title_case("седна"), "Седна");
        assert_eq!(title_case("alpha centauri"), "Alpha Centauri");
    }
}
