use std::path::Path;

use csv::ReaderBuilder;
use icd_model::PatientRecord;
use serde::Serialize;
use tracing::{debug, info};

use crate::diagnoses::parse_diagnoses;
use crate::error::{IngestError, Result};

/// Column holding the diagnosis list when none is configured.
pub const DEFAULT_DIAGNOSIS_COLUMN: &str = "Diagnoses_list";

/// Column selection for [`load_diagnosis_csv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub diagnosis_column: String,
    /// Column supplying patient ids; rows are numbered from 1 when unset.
    pub id_column: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            diagnosis_column: DEFAULT_DIAGNOSIS_COLUMN.to_string(),
            id_column: None,
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_diagnosis_column(mut self, column: impl Into<String>) -> Self {
        self.diagnosis_column = column.into();
        self
    }

    #[must_use]
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }
}

/// Summary of a loaded diagnosis file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub total_rows: usize,
    /// Rows with at least one usable diagnosis.
    pub valid_rows: usize,
    pub total_diagnoses: usize,
    /// Rows whose cell held only placeholders or fragments.
    pub empty_diagnoses: usize,
    pub validation_errors: Vec<String>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_column(headers: &[String], column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}

/// Loads patient diagnosis records from a CSV file.
///
/// Rows whose diagnosis cell is blank are skipped. The remaining rows are
/// numbered from 1 in file order; that number is the patient id unless an id
/// column is configured and the row's id cell is non-empty.
pub fn load_diagnosis_csv(path: &Path, options: &CsvOptions) -> Result<Vec<PatientRecord>> {
    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let diagnosis_idx = find_column(&headers, &options.diagnosis_column, path)?;
    let id_idx = options
        .id_column
        .as_deref()
        .map(|column| find_column(&headers, column, path))
        .transpose()?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let cell = row.get(diagnosis_idx).unwrap_or("").trim();
        if cell.is_empty() {
            skipped += 1;
            continue;
        }
        let row_number = records.len() + 1;
        let patient_id = id_idx
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| row_number.to_string(), str::to_string);
        records.push(PatientRecord {
            patient_id,
            diagnoses: parse_diagnoses(cell),
        });
    }

    if skipped > 0 {
        debug!(skipped, "skipped rows with blank diagnosis cells");
    }
    info!(
        path = %path.display(),
        records = records.len(),
        "loaded diagnosis records"
    );
    Ok(records)
}

/// Counts usable rows and diagnoses, listing rows that yielded nothing.
pub fn validate_records(records: &[PatientRecord]) -> IngestStats {
    let mut stats = IngestStats {
        total_rows: records.len(),
        ..IngestStats::default()
    };
    for (idx, record) in records.iter().enumerate() {
        if record.diagnoses.is_empty() {
            stats.empty_diagnoses += 1;
            stats
                .validation_errors
                .push(format!("Row {}: No valid diagnoses found", idx + 1));
        } else {
            stats.valid_rows += 1;
            stats.total_diagnoses += record.diagnoses.len();
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_strips_bom_and_spacing() {
        assert_eq!(normalize_header("\u{feff}Diagnoses_list "), "Diagnoses_list");
        assert_eq!(normalize_header(" Patient   ID"), "Patient ID");
    }

    #[test]
    fn validation_counts_rows_and_diagnoses() {
        let records = vec![
            PatientRecord {
                patient_id: "1".to_string(),
                diagnoses: vec!["Fever".to_string(), "Anemia".to_string()],
            },
            PatientRecord {
                patient_id: "2".to_string(),
                diagnoses: Vec::new(),
            },
        ];
        let stats = validate_records(&records);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.valid_rows, 1);
        assert_eq!(stats.total_diagnoses, 2);
        assert_eq!(stats.empty_diagnoses, 1);
        assert_eq!(stats.validation_errors, vec!["Row 2: No valid diagnoses found"]);
    }
}
