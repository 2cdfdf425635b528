//! Error types for diagnosis ingestion and reference data loading.

use std::path::PathBuf;

use icd_model::{CatalogError, ConfigError};
use thiserror::Error;

/// Errors that can occur while reading input or reference files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Reference Data Errors ===
    /// Malformed TOML document.
    #[error("failed to parse TOML {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A catalog row failed validation.
    #[error("invalid catalog row {line} in {path}: {source}")]
    InvalidCatalogRow {
        path: PathBuf,
        line: u64,
        #[source]
        source: CatalogError,
    },

    /// Configuration values out of range.
    #[error("invalid configuration in {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
