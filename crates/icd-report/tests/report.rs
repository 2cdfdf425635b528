//! Export and report rendering tests.

use icd_model::{MappingCandidate, MappingResult, MatchSource, PatientMappings};
use icd_report::{
    ConfidenceLevel, ConfidenceThresholds, MappingStatistics, render_text_report, review_queue,
    to_json, write_csv,
};

const NO_MATCH: &str = "no mapping met the minimum confidence threshold; manual review required";

fn mapped(
    text: &str,
    code: &str,
    description: &str,
    confidence: f64,
    source: MatchSource,
    justification: &str,
) -> MappingResult {
    MappingResult {
        original_diagnosis: text.to_string(),
        code: Some(code.to_string()),
        description: Some(description.to_string()),
        confidence,
        source: Some(source),
        justification: justification.to_string(),
        alternatives: Vec::new(),
    }
}

fn sample_results() -> Vec<PatientMappings> {
    let mut hypertension = mapped(
        "high blood pressure",
        "I10",
        "Essential (primary) hypertension",
        0.85,
        MatchSource::Pattern,
        "matched keyword pattern for high blood pressure",
    );
    hypertension.alternatives.push(MappingCandidate {
        code: "I11.9".to_string(),
        description: "Hypertensive heart disease without heart failure".to_string(),
        confidence: 0.5312,
        source: MatchSource::Fuzzy,
        condition: None,
    });
    let fever = mapped(
        "Fever",
        "R50.9",
        "Fever, unspecified",
        1.0,
        MatchSource::Exact,
        "direct description match",
    );
    vec![
        PatientMappings {
            patient_id: "1".to_string(),
            mappings: vec![hypertension, fever],
        },
        PatientMappings {
            patient_id: "2".to_string(),
            mappings: vec![MappingResult::unmapped(
                "xyzzy nonsense condition",
                NO_MATCH,
                Vec::new(),
            )],
        },
    ]
}

#[test]
fn csv_export_writes_one_row_per_mapping() {
    let mut buffer = Vec::new();
    write_csv(&sample_results(), &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(csv, @r#"
    Patient_ID,Original_Diagnosis,ICD10_Code,ICD10_Description,Confidence_Score,Justification,Alternative_Codes
    1,high blood pressure,I10,Essential (primary) hypertension,0.85,matched keyword pattern for high blood pressure,I11.9: Hypertensive heart disease without heart failure (Score: 0.53)
    1,Fever,R50.9,"Fever, unspecified",1.00,direct description match,
    2,xyzzy nonsense condition,UNKNOWN,,0.00,no mapping met the minimum confidence threshold; manual review required,
    "#);
}

#[test]
fn csv_export_of_no_results_is_header_only() {
    let mut buffer = Vec::new();
    write_csv(&[], &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "Patient_ID,Original_Diagnosis,ICD10_Code,ICD10_Description,Confidence_Score,Justification,Alternative_Codes\n"
    );
}

#[test]
fn json_export_nests_mappings_per_patient() {
    let results = sample_results();
    let json = to_json(&results[1..]).unwrap();
    insta::assert_snapshot!(json, @r#"
    [
      {
        "patient_id": "2",
        "mappings": [
          {
            "original_diagnosis": "xyzzy nonsense condition",
            "code": null,
            "description": null,
            "confidence": 0.0,
            "source": null,
            "justification": "no mapping met the minimum confidence threshold; manual review required",
            "alternatives": []
          }
        ]
      }
    ]
    "#);

    let parsed: Vec<PatientMappings> = serde_json::from_str(&to_json(&results).unwrap()).unwrap();
    assert_eq!(parsed, results);
}

#[test]
fn statistics_summarize_the_run() {
    let stats = MappingStatistics::from_results(&sample_results(), 0.7);
    assert_eq!(stats.total_patients, 2);
    assert_eq!(stats.total_mappings, 3);
    assert!((stats.average_confidence - 1.85 / 3.0).abs() < 1e-9);
    assert_eq!(stats.high_confidence_count, 2);
    assert_eq!(stats.unmapped_count, 1);
    assert_eq!(stats.unique_codes, 2);
    assert_eq!(stats.distribution[&ConfidenceLevel::VeryHigh], 1);
    assert_eq!(stats.distribution[&ConfidenceLevel::High], 1);
    assert_eq!(stats.distribution[&ConfidenceLevel::Medium], 0);
    assert_eq!(stats.distribution[&ConfidenceLevel::Low], 1);
}

#[test]
fn statistics_of_empty_run_are_zero() {
    let stats = MappingStatistics::from_results(&[], 0.7);
    assert_eq!(stats.total_mappings, 0);
    assert_eq!(stats.average_confidence, 0.0);
    assert_eq!(stats.percent(0), 0.0);
    assert_eq!(stats.distribution.len(), 4);
}

#[test]
fn review_queue_lists_low_confidence_and_unmapped() {
    let results = sample_results();
    let queue = review_queue(&results, 0.9);
    let items: Vec<(&str, &str)> = queue
        .iter()
        .map(|item| (item.patient_id, item.mapping.original_diagnosis.as_str()))
        .collect();
    assert_eq!(
        items,
        vec![("1", "high blood pressure"), ("2", "xyzzy nonsense condition")]
    );
}

#[test]
fn text_report_renders_summary_and_detail() {
    let report = render_text_report(&sample_results(), 0.7, &ConfidenceThresholds::default());
    insta::assert_snapshot!(report, @r"
    ICD-10 Mapping Report
    =====================

    Summary:
    - Total Patients: 2
    - Total Diagnoses Mapped: 3
    - Average Confidence Score: 0.62
    - High Confidence Mappings: 2 (66.7%)
    - Unmapped Diagnoses: 1 (33.3%)
    - Unique ICD-10 Codes Used: 2

    Confidence Distribution:
    - Very High (>=0.9): 1
    - High (0.7-0.9): 1
    - Medium (0.5-0.7): 0
    - Low (<0.5): 1

    Detailed Results:

    Patient 1:
      * high blood pressure
        -> I10: Essential (primary) hypertension
        Confidence: 0.85
        Alternatives: 1 found
      * Fever
        -> R50.9: Fever, unspecified
        Confidence: 1.00

    Patient 2:
      * xyzzy nonsense condition
        -> UNKNOWN: no mapping met the minimum confidence threshold; manual review required
        Confidence: 0.00
    ");
}

#[test]
fn text_report_of_no_results() {
    assert_eq!(
        render_text_report(&[], 0.7, &ConfidenceThresholds::default()),
        "No mapping results to report.\n"
    );
}
