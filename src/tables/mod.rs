//! Read-only lookup tables for the normalization pipeline.
//!
//! Everything the transform needs to know about the source vocabulary lives
//! here as process-wide constants, loaded once:
//!
//! - [`COLUMN_MAP`] - Russian column labels → canonical identifiers
//! - [`NAME_TRANSLATIONS`] - Russian body names → canonical identifiers
//! - [`ORBITAL_ELEMENTS`] - supplementary orbital constants (NASA data)
//! - [`MOON_PARENT_RULES`] - ordered category markers → parent identifier
//! - period unit markers and day-conversion factors
//!
//! The tables are immutable; nothing in the pipeline mutates them.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// =============================================================================
// Column mapping
// =============================================================================

/// Source-language column labels → canonical identifiers.
///
/// Labels absent from this table pass through the normalizer unchanged.
pub static COLUMN_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Небесное тело", "name"),
        ("Тип", "type"),
        ("Диаметр (км)", "diameter_km"),
        ("Атм. давление (бар)", "atmosphere_pressure_bar"),
        ("Длина суток", "rotation_period"),
        ("Орбитальный период", "orbital_period"),
        ("Состав атмосферы", "atmosphere_composition"),
        ("Состав тела", "body_composition"),
        ("Мин. темп. (°C)", "min_temp_c"),
        ("Макс. темп. (°C)", "max_temp_c"),
        ("Темп. терминатора (°C)", "terminator_temp_c"),
        ("Ширина терминатора (км)", "terminator_width_km"),
        ("Условный терминатор", "terminator_notes"),
    ])
});

// =============================================================================
// Name translation
// =============================================================================

/// Russian display names → canonical lowercase identifiers.
///
/// A display name missing here falls back to its lower-cased form.
pub static NAME_TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Меркурий", "mercury"),
        ("Венера", "venus"),
        ("Земля", "earth"),
        ("Луна", "moon"),
        ("Марс", "mars"),
        ("Фобос", "phobos"),
        ("Деймос", "deimos"),
        ("Юпитер", "jupiter"),
        ("Ио", "io"),
        ("Европа", "europa"),
        ("Ганимед", "ganymede"),
        ("Каллисто", "callisto"),
        ("Сатурн", "saturn"),
        ("Мимас", "mimas"),
        ("Энцелад", "enceladus"),
        ("Тефия", "tethys"),
        ("Диона", "dione"),
        ("Рея", "rhea"),
        ("Титан", "titan"),
        ("Япет", "iapetus"),
        ("Уран", "uranus"),
        ("Миранда", "miranda"),
        ("Ариэль", "ariel"),
        ("Умбриэль", "umbriel"),
        ("Титания", "titania"),
        ("Оберон", "oberon"),
        ("Нептун", "neptune"),
        ("Тритон", "triton"),
        ("Плутон", "pluto"),
        ("Харон", "charon"),
    ])
});

// =============================================================================
// Category markers
// =============================================================================

/// Canonical identifier of the central star.
pub const SUN_ID: &str = "sun";

/// Exact category label for a planet.
pub const PLANET_CATEGORY: &str = "Планета";

/// Exact category label for a dwarf planet.
pub const DWARF_PLANET_CATEGORY: &str = "Карликовая планета";

/// Substring marking the dwarf-planet category.
pub const DWARF_PLANET_MARKER: &str = "Карликовая";

/// Substring marking embedded footnote/header rows ("Примечания" sections).
pub const FOOTNOTE_SECTION_MARKER: &str = "Примечания";

/// Ordered moon-category markers, each naming the planet the moon orbits.
///
/// Evaluated top to bottom, first match wins. The categories are mutually
/// exclusive in the source vocabulary, but first-match semantics must be
/// preserved if markers ever overlap.
pub const MOON_PARENT_RULES: &[(&str, &str)] = &[
    ("Спутник Земли", "earth"),
    ("Спутник Марса", "mars"),
    ("Спутник Юпитера", "jupiter"),
    ("Спутник Сатурна", "saturn"),
    ("Спутник Урана", "uranus"),
    ("Спутник Нептуна", "neptune"),
    ("Спутник Плутона", "pluto"),
];

// =============================================================================
// Period units
// =============================================================================

/// Hours in a day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Days in a Julian year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Mean days in a synodic-ish month, as the source material uses it.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Substrings identifying hour-valued periods.
///
/// Multi-letter markers only: the source's single-letter abbreviations
/// ("ч", "д") are substrings of unrelated unit words ("д" is inside "год"),
/// so they are deliberately excluded.
pub const HOUR_MARKERS: &[&str] = &["час"];

/// Substrings identifying day-valued periods.
pub const DAY_MARKERS: &[&str] = &["дней", "суток", "сут", "день", "дня"];

/// Substrings identifying year-valued periods.
pub const YEAR_MARKERS: &[&str] = &["лет", "год"];

/// Substrings identifying month-valued periods.
pub const MONTH_MARKERS: &[&str] = &["месяц"];

// =============================================================================
// Orbital elements
// =============================================================================

/// Supplementary orbital constants for one body (NASA fact-sheet values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in AU, or in km when `is_distance_km` is set.
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Inclination to the ecliptic, degrees.
    pub inclination: f64,
    /// Axial tilt, degrees.
    pub axial_tilt: f64,
    /// Set when `semi_major_axis` is an absolute distance in km (the Moon)
    /// rather than AU.
    pub is_distance_km: bool,
}

impl OrbitalElements {
    const fn au(semi_major_axis: f64, eccentricity: f64, inclination: f64, axial_tilt: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            axial_tilt,
            is_distance_km: false,
        }
    }

    const fn km(semi_major_axis: f64, eccentricity: f64, inclination: f64, axial_tilt: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            axial_tilt,
            is_distance_km: true,
        }
    }
}

/// Orbital elements keyed by canonical identifier.
///
/// Not derivable from the spreadsheet; merged into the output records for
/// bodies listed here.
pub static ORBITAL_ELEMENTS: Lazy<HashMap<&'static str, OrbitalElements>> = Lazy::new(|| {
    HashMap::from([
        ("mercury", OrbitalElements::au(0.387098, 0.205630, 7.005, 0.034)),
        ("venus", OrbitalElements::au(0.723332, 0.006772, 3.39458, 177.36)),
        ("earth", OrbitalElements::au(1.000001018, 0.0167086, 0.00005, 23.4392811)),
        ("mars", OrbitalElements::au(1.523679, 0.0934, 1.85, 25.19)),
        ("jupiter", OrbitalElements::au(5.2044, 0.0489, 1.303, 3.13)),
        ("saturn", OrbitalElements::au(9.5826, 0.0565, 2.485, 26.73)),
        ("uranus", OrbitalElements::au(19.2184, 0.046381, 0.773, 97.77)),
        ("neptune", OrbitalElements::au(30.07, 0.0113, 1.767975, 28.32)),
        ("pluto", OrbitalElements::au(39.482, 0.2488, 17.16, 122.53)),
        // The Moon's semi-major axis is its distance from Earth in km.
        ("moon", OrbitalElements::km(384400.0, 0.0549, 5.145, 1.5424)),
    ])
});
