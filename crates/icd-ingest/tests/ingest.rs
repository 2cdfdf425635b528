//! File-based ingestion tests.

use std::path::PathBuf;

use icd_ingest::{
    CsvOptions, IngestError, load_catalog_csv, load_config_toml, load_diagnosis_csv,
    load_rules_toml, validate_records,
};
use icd_model::{Category, MapperConfig};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_diagnosis_csv_with_default_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "patients.csv",
        "Age,Diagnoses_list\n\
         64,\"['Type 2 diabetes', 'Hypertension']\"\n\
         71,\n\
         58,Fever; N/A; Anemia\n\
         40,none\n",
    );

    let records = load_diagnosis_csv(&path, &CsvOptions::default()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].patient_id, "1");
    assert_eq!(records[0].diagnoses, vec!["Type 2 diabetes", "Hypertension"]);
    // The blank row is skipped before numbering.
    assert_eq!(records[1].patient_id, "2");
    assert_eq!(records[1].diagnoses, vec!["Fever", "Anemia"]);
    assert_eq!(records[2].patient_id, "3");
    assert!(records[2].diagnoses.is_empty());

    let stats = validate_records(&records);
    assert_eq!(stats.total_rows, 3);
    assert_eq!(stats.valid_rows, 2);
    assert_eq!(stats.total_diagnoses, 4);
    assert_eq!(stats.empty_diagnoses, 1);
    assert_eq!(stats.validation_errors, vec!["Row 3: No valid diagnoses found"]);
}

#[test]
fn test_load_diagnosis_csv_with_custom_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "visits.csv",
        "MRN,Problems\nP-001,Pneumonia\n,Sepsis\nP-003,\"COPD, asthma\"\n",
    );
    let options = CsvOptions::default()
        .with_diagnosis_column("Problems")
        .with_id_column("MRN");

    let records = load_diagnosis_csv(&path, &options).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(ids, vec!["P-001", "2", "P-003"]);
    assert_eq!(records[2].diagnoses, vec!["COPD", "asthma"]);
}

#[test]
fn test_missing_diagnosis_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "patients.csv", "Age,Notes\n64,fever\n");

    let err = load_diagnosis_csv(&path, &CsvOptions::default()).unwrap_err();
    match err {
        IngestError::MissingColumn { column, .. } => assert_eq!(column, "Diagnoses_list"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_id_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "patients.csv", "Diagnoses_list\nfever\n");
    let options = CsvOptions::default().with_id_column("MRN");

    let err = load_diagnosis_csv(&path, &options).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "MRN"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_diagnosis_csv(&dir.path().join("absent.csv"), &CsvOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::CsvParse { .. }));
}

#[test]
fn test_load_catalog_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "catalog.csv",
        "code,description,category\n\
         R51.9 ,\"Headache, unspecified\", symptoms\n\
         G43.909,\"Migraine, unspecified\",Symptoms\n",
    );

    let entries = load_catalog_csv(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].code, "R51.9");
    assert_eq!(entries[0].description, "Headache, unspecified");
    assert_eq!(entries[0].category, Category::Symptoms);
    assert_eq!(entries[1].code, "G43.909");
}

#[test]
fn test_catalog_unknown_category_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "catalog.csv",
        "code,description,category\nR51.9,Headache,Symptoms\nG43.909,Migraine,Neurology\n",
    );

    let err = load_catalog_csv(&path).unwrap_err();
    match err {
        IngestError::InvalidCatalogRow { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_rules_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "rules.toml",
        r#"
[[rule]]
condition = "migraine"
keywords = ["throbbing", "one side"]
code = "G43.909"
confidence = 0.88

[[rule]]
condition = "headache"
keywords = ["head pain"]
code = "R51.9"
confidence = 0.7
"#,
    );

    let rules = load_rules_toml(&path).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].condition, "migraine");
    assert_eq!(rules[0].keywords, vec!["throbbing", "one side"]);
    assert_eq!(rules[0].base_confidence, 0.88);
    assert_eq!(rules[1].code, "R51.9");
}

#[test]
fn test_rules_toml_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "rules.toml", "[[rule]]\ncondition = \n");
    assert!(matches!(
        load_rules_toml(&path).unwrap_err(),
        IngestError::TomlParse { .. }
    ));
}

#[test]
fn test_load_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "mapper.toml",
        "confidence_threshold = 0.8\nmax_suggestions = 5\n",
    );

    let config = load_config_toml(&path).unwrap();
    assert_eq!(
        config,
        MapperConfig {
            confidence_threshold: 0.8,
            max_suggestions: 5,
            ..MapperConfig::default()
        }
    );
}

#[test]
fn test_config_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mapper.toml", "acceptance_floor = 1.5\n");
    assert!(matches!(
        load_config_toml(&path).unwrap_err(),
        IngestError::InvalidConfig { .. }
    ));
}

#[test]
fn test_config_file_missing() {
    let dir = TempDir::new().unwrap();
    let err = load_config_toml(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}
