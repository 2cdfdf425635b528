//! Loading replacement reference data and configuration from disk.
//!
//! Catalog files are CSV with `code,description,category` columns. Rule
//! files are TOML documents with one `[[rule]]` table per rule. Configuration
//! files are TOML documents holding any subset of the [`MapperConfig`]
//! fields.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use icd_model::{CatalogEntry, Category, MapperConfig, PatternRule};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    code: String,
    description: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default, rename = "rule")]
    rules: Vec<PatternRule>,
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|source| IngestError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads catalog entries from a CSV file, in file order.
///
/// Categories are matched case-insensitively against the known category
/// names. Code format and uniqueness are checked when the engine is built.
pub fn load_catalog_csv(path: &Path) -> Result<Vec<CatalogEntry>> {
    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut entries = Vec::new();
    for (idx, row) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = row.map_err(csv_error)?;
        let category: Category =
            row.category
                .parse()
                .map_err(|source| IngestError::InvalidCatalogRow {
                    path: path.to_path_buf(),
                    // Header is line 1.
                    line: idx as u64 + 2,
                    source,
                })?;
        entries.push(CatalogEntry::new(row.code, row.description, category));
    }
    info!(path = %path.display(), codes = entries.len(), "loaded catalog");
    Ok(entries)
}

/// Loads pattern rules from a TOML file, in file order.
pub fn load_rules_toml(path: &Path) -> Result<Vec<PatternRule>> {
    let file: RulesFile = parse_toml(path)?;
    info!(path = %path.display(), rules = file.rules.len(), "loaded pattern rules");
    Ok(file.rules)
}

/// Loads and validates a mapper configuration. Missing fields take their
/// defaults.
pub fn load_config_toml(path: &Path) -> Result<MapperConfig> {
    let config: MapperConfig = parse_toml(path)?;
    config
        .validate()
        .map_err(|source| IngestError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config)
}
