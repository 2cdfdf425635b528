//! CSV and JSON exports of mapping results.

use std::io::Write;

use icd_model::{MappingCandidate, PatientMappings};

use crate::error::Result;

/// Code written for diagnoses that were not mapped.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

const CSV_HEADERS: [&str; 7] = [
    "Patient_ID",
    "Original_Diagnosis",
    "ICD10_Code",
    "ICD10_Description",
    "Confidence_Score",
    "Justification",
    "Alternative_Codes",
];

/// Formats alternatives as `"<code>: <description> (Score: <score>)"`
/// joined by `"; "`.
///
/// ```
/// use icd_model::{MappingCandidate, MatchSource};
/// use icd_report::format_alternatives;
///
/// let alt = MappingCandidate {
///     code: "I11.9".to_string(),
///     description: "Hypertensive heart disease without heart failure".to_string(),
///     confidence: 0.5312,
///     source: MatchSource::Fuzzy,
///     condition: None,
/// };
/// assert_eq!(
///     format_alternatives(&[alt]),
///     "I11.9: Hypertensive heart disease without heart failure (Score: 0.53)"
/// );
/// ```
pub fn format_alternatives(alternatives: &[MappingCandidate]) -> String {
    alternatives
        .iter()
        .map(|alt| {
            format!(
                "{}: {} (Score: {:.2})",
                alt.code, alt.description, alt.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Writes one CSV row per mapping, patients in order.
pub fn write_csv<W: Write>(results: &[PatientMappings], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for patient in results {
        for mapping in &patient.mappings {
            let confidence = format!("{:.2}", mapping.confidence);
            let alternatives = format_alternatives(&mapping.alternatives);
            csv_writer.write_record([
                patient.patient_id.as_str(),
                mapping.original_diagnosis.as_str(),
                mapping.code.as_deref().unwrap_or(UNKNOWN_CODE),
                mapping.description.as_deref().unwrap_or(""),
                confidence.as_str(),
                mapping.justification.as_str(),
                alternatives.as_str(),
            ])?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serializes results as a pretty-printed JSON array of
/// `{patient_id, mappings}` objects.
pub fn to_json(results: &[PatientMappings]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
