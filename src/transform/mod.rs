//! Row transformation: column renaming, classification, unit conversion.

pub mod columns;
pub mod parent;
pub mod period;
pub mod pipeline;

pub use columns::{normalize_headers, normalize_records};
pub use parent::resolve_parent;
pub use period::parse_period;
pub use pipeline::{
    atlas_to_json, transform_bytes, transform_csv, transform_rows, write_atlas, CsvInfo,
    PipelineResult, SkippedRow, TransformOptions,
};
