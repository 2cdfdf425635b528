//! Mapping pipeline stages shared by the CLI commands.
//!
//! Run order: [`resolve_config`], [`load_engine`], then [`map_records`] over
//! the records produced by `icd_ingest::load_diagnosis_csv`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use icd_ingest::{load_catalog_csv, load_config_toml, load_rules_toml};
use icd_map::{MappingEngine, builtin_catalog, builtin_rules};
use icd_model::{MapperConfig, PatientMappings, PatientRecord};

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub confidence_threshold: Option<f64>,
    pub max_suggestions: Option<usize>,
}

/// Builds the run configuration.
///
/// Precedence, lowest first: defaults, the TOML file at `config_path`, then
/// `overrides`. The result is validated after the overrides are applied.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<MapperConfig> {
    let mut config = match config_path {
        Some(path) => load_config_toml(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => MapperConfig::default(),
    };
    if let Some(threshold) = overrides.confidence_threshold {
        config = config.with_confidence_threshold(threshold);
    }
    if let Some(max) = overrides.max_suggestions {
        config = config.with_max_suggestions(max);
    }
    config.validate().context("invalid configuration")?;
    debug!(?config, "resolved mapper configuration");
    Ok(config)
}

/// Builds the engine, replacing the built-in catalog or rules with the
/// given files.
pub fn load_engine(catalog_path: Option<&Path>, rules_path: Option<&Path>) -> Result<MappingEngine> {
    let catalog = match catalog_path {
        Some(path) => {
            load_catalog_csv(path).with_context(|| format!("load catalog {}", path.display()))?
        }
        None => builtin_catalog(),
    };
    let rules = match rules_path {
        Some(path) => {
            load_rules_toml(path).with_context(|| format!("load rules {}", path.display()))?
        }
        None => builtin_rules(),
    };
    MappingEngine::new(catalog, rules).context("build mapping engine")
}

/// Maps every diagnosis of every record.
///
/// Patients keep their input order and each patient's mappings follow the
/// order of its diagnoses. `progress(done, total)` counts diagnoses; in
/// parallel mode it is called once, after the whole batch.
pub fn map_records<F>(
    engine: &MappingEngine,
    records: &[PatientRecord],
    config: &MapperConfig,
    parallel: bool,
    mut progress: F,
) -> Vec<PatientMappings>
where
    F: FnMut(usize, usize),
{
    let span = info_span!("map_records", patients = records.len(), parallel);
    let _guard = span.enter();

    let texts: Vec<&str> = records
        .iter()
        .flat_map(|record| record.diagnoses.iter().map(String::as_str))
        .collect();
    let total = texts.len();
    let flat = if parallel {
        let results = engine.map_batch_parallel(&texts, config);
        progress(total, total);
        results
    } else {
        engine.map_batch_with_progress(&texts, config, &mut progress)
    };
    let mut mapped = flat.into_iter();

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        if record.diagnoses.is_empty() {
            warn!(patient_id = %record.patient_id, "no valid diagnoses for patient");
        }
        let mappings: Vec<_> = mapped.by_ref().take(record.diagnoses.len()).collect();
        results.push(PatientMappings {
            patient_id: record.patient_id.clone(),
            mappings,
        });
    }
    info!(patients = results.len(), diagnoses = total, "mapping complete");
    results
}
