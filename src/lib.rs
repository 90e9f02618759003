//! # Orrery - celestial-body spreadsheet normalization
//!
//! Orrery converts a Russian-language spreadsheet of solar-system bodies
//! into a normalized JSON atlas keyed by body identifier, for consumption
//! by the orrery front-end visualization.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Loader    │────▶│  Transform  │────▶│  JSON Atlas │
//! │ (ru, 1251)  │     │ (auto-enc)  │     │ (tables)    │     │ (by id)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orrery::{transform_csv, TransformOptions};
//! use std::path::Path;
//!
//! let result = transform_csv(Path::new("solar_system.csv"), TransformOptions::default())?;
//! println!("Normalized {} bodies", result.bodies.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - hierarchical error types
//! - [`models`] - output records ([`CelestialBody`], [`Atlas`])
//! - [`parser`] - CSV loading with encoding auto-detection
//! - [`tables`] - the fixed lookup tables (columns, names, orbital elements)
//! - [`transform`] - column normalization, classification, unit conversion
//! - [`validation`] - schema validation and atlas invariants
//! - [`api`] - static file server

// Core modules
pub mod error;
pub mod models;
pub mod tables;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// HTTP
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, ServerError, TransformError, ValidationError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Atlas, BodyType, CelestialBody};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    csv_to_json, decode_content, detect_delimiter, detect_encoding, parse_bytes_auto,
    parse_csv_file_auto, ParseResult,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    atlas_to_json, normalize_headers, normalize_records, parse_period, resolve_parent,
    transform_bytes, transform_csv, transform_rows, write_atlas, CsvInfo, PipelineResult,
    SkippedRow, TransformOptions,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check_atlas_invariants, is_valid, is_valid_body, validate, validate_body};

// Server
pub mod server {
    pub use crate::api::server::{app, start_server};
}
