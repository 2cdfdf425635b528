use std::path::PathBuf;

use icd_ingest::IngestStats;
use icd_model::{MapperConfig, MappingResult, PatientMappings};

/// Outcome of a `map` run.
#[derive(Debug)]
pub struct MapResult {
    pub input: PathBuf,
    /// `None` when results went to stdout.
    pub output: Option<PathBuf>,
    pub config: MapperConfig,
    pub ingest: IngestStats,
    pub results: Vec<PatientMappings>,
}

/// Outcome of a `lookup` run.
#[derive(Debug)]
pub struct LookupResult {
    pub config: MapperConfig,
    pub results: Vec<MappingResult>,
}
