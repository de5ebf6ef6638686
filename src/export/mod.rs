//! Export module for cashflow-cli
//!
//! Writes projections to disk:
//! - CSV: one row per projected month (spreadsheet-compatible)
//! - JSON: the projection with its inputs, schema-versioned
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::error::CashflowResult;

pub use self::csv::export_projection_csv;
pub use json::{
    export_projection_json, import_projection_json, ProjectedMonth, ProjectionExport,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_projection_yaml, import_projection_yaml};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV, projected months only
    Csv,
    /// JSON, projection with its inputs
    Json,
    /// YAML, projection with its inputs (human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Write an export in the requested format
pub fn write_projection<W: Write>(
    export: &ProjectionExport,
    format: ExportFormat,
    writer: &mut W,
) -> CashflowResult<()> {
    match format {
        ExportFormat::Csv => export_projection_csv(export, writer),
        ExportFormat::Json => export_projection_json(export, writer, true),
        ExportFormat::Yaml => export_projection_yaml(export, writer),
    }
}
