//! Plain-text mapping report.

use icd_model::PatientMappings;

use crate::confidence::{ConfidenceLevel, ConfidenceThresholds};
use crate::export::UNKNOWN_CODE;
use crate::stats::MappingStatistics;

/// Renders a summary of the run followed by per-patient detail.
///
/// `confidence_threshold` is the review threshold used for the
/// high-confidence count; `thresholds` defines the distribution bands.
pub fn render_text_report(
    results: &[PatientMappings],
    confidence_threshold: f64,
    thresholds: &ConfidenceThresholds,
) -> String {
    if results.is_empty() {
        return "No mapping results to report.\n".to_string();
    }
    let stats = MappingStatistics::from_results_with(results, confidence_threshold, thresholds);

    let mut lines = vec![
        "ICD-10 Mapping Report".to_string(),
        "=====================".to_string(),
        String::new(),
        "Summary:".to_string(),
        format!("- Total Patients: {}", stats.total_patients),
        format!("- Total Diagnoses Mapped: {}", stats.total_mappings),
        format!(
            "- Average Confidence Score: {:.2}",
            stats.average_confidence
        ),
        format!(
            "- High Confidence Mappings: {} ({:.1}%)",
            stats.high_confidence_count,
            stats.percent(stats.high_confidence_count)
        ),
        format!(
            "- Unmapped Diagnoses: {} ({:.1}%)",
            stats.unmapped_count,
            stats.percent(stats.unmapped_count)
        ),
        format!("- Unique ICD-10 Codes Used: {}", stats.unique_codes),
        String::new(),
        "Confidence Distribution:".to_string(),
    ];
    for level in ConfidenceLevel::DESCENDING {
        lines.push(format!(
            "- {} ({}): {}",
            level.label(),
            thresholds.range_label(level),
            stats.distribution.get(&level).copied().unwrap_or(0)
        ));
    }
    lines.push(String::new());
    lines.push("Detailed Results:".to_string());

    for patient in results {
        lines.push(String::new());
        lines.push(format!("Patient {}:", patient.patient_id));
        for mapping in &patient.mappings {
            lines.push(format!("  * {}", mapping.original_diagnosis));
            lines.push(format!(
                "    -> {}: {}",
                mapping.code.as_deref().unwrap_or(UNKNOWN_CODE),
                mapping
                    .description
                    .as_deref()
                    .unwrap_or(mapping.justification.as_str())
            ));
            lines.push(format!("    Confidence: {:.2}", mapping.confidence));
            if !mapping.alternatives.is_empty() {
                lines.push(format!(
                    "    Alternatives: {} found",
                    mapping.alternatives.len()
                ));
            }
        }
    }
    lines.push(String::new());
    lines.join("\n")
}
