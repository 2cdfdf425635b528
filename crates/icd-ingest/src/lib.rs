pub mod csv_ingest;
pub mod diagnoses;
pub mod error;
pub mod reference;

pub use csv_ingest::{
    CsvOptions, DEFAULT_DIAGNOSIS_COLUMN, IngestStats, load_diagnosis_csv, validate_records,
};
pub use diagnoses::{clean_diagnosis, parse_diagnoses};
pub use error::{IngestError, Result};
pub use reference::{load_catalog_csv, load_config_toml, load_rules_toml};
