use serde::{Deserialize, Serialize};

use crate::mapping::MappingResult;

/// Diagnoses extracted from one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub diagnoses: Vec<String>,
}

/// Mapping results for one patient, in the order of their diagnoses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientMappings {
    pub patient_id: String,
    pub mappings: Vec<MappingResult>,
}
