//! Tests for icd-model types.

use icd_model::{
    CatalogError, Category, ConfigError, MapperConfig, MappingCandidate, MappingResult,
    MatchSource, is_valid_code,
};

#[test]
fn category_parses_case_insensitively() {
    assert_eq!("endocrine".parse::<Category>().unwrap(), Category::Endocrine);
    assert_eq!(" Blood ".parse::<Category>().unwrap(), Category::Blood);
    assert_eq!(
        "Cardio".parse::<Category>(),
        Err(CatalogError::UnknownCategory("Cardio".to_string()))
    );
}

#[test]
fn category_names_round_trip() {
    for category in Category::ALL {
        assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
    }
}

#[test]
fn code_shape_validation() {
    for code in ["E11.9", "I10", "Z66", "S22.43XA", "F17.210", "R06.02"] {
        assert!(is_valid_code(code), "{code} should be valid");
    }
    for code in ["", "e11.9", "E1", "E11.", "E11.12345", "11.9", "UNKNOWN", "E11-9"] {
        assert!(!is_valid_code(code), "{code} should be invalid");
    }
}

#[test]
fn match_source_precedence_orders_exact_first() {
    let mut sources = vec![MatchSource::Fuzzy, MatchSource::Exact, MatchSource::Pattern];
    sources.sort();
    assert_eq!(
        sources,
        vec![MatchSource::Exact, MatchSource::Pattern, MatchSource::Fuzzy]
    );
    assert!(MatchSource::Exact.precedence() < MatchSource::Fuzzy.precedence());
}

#[test]
fn default_config_is_valid() {
    let config = MapperConfig::default();
    assert_eq!(config.confidence_threshold, 0.7);
    assert_eq!(config.max_suggestions, 3);
    assert_eq!(config.acceptance_floor, 0.3);
    assert_eq!(config.fuzzy_floor, 0.5);
    assert_eq!(config.fuzzy_top_k, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_out_of_range_values() {
    let config = MapperConfig {
        fuzzy_floor: 1.5,
        ..MapperConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::OutOfRange {
            field: "fuzzy_floor",
            value: 1.5
        })
    );

    let config = MapperConfig {
        acceptance_floor: f64::NAN,
        ..MapperConfig::default()
    };
    assert!(config.validate().is_err());

    let config = MapperConfig {
        fuzzy_top_k: 0,
        ..MapperConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::Zero {
            field: "fuzzy_top_k"
        })
    );
}

#[test]
fn partial_toml_config_keeps_defaults() {
    let config: MapperConfig = toml::from_str("max_suggestions = 5\nfuzzy_floor = 0.6\n").unwrap();
    assert_eq!(config.max_suggestions, 5);
    assert_eq!(config.fuzzy_floor, 0.6);
    assert_eq!(config.acceptance_floor, 0.3);
}

#[test]
fn unmapped_result_needs_review() {
    let result = MappingResult::unmapped("xyzzy", "no match", Vec::new());
    assert!(!result.is_mapped());
    assert_eq!(result.confidence, 0.0);
    assert!(result.needs_review(0.0));
}

#[test]
fn result_serializes_field_for_field() {
    let result = MappingResult {
        original_diagnosis: "HTN".to_string(),
        code: Some("I10".to_string()),
        description: Some("Essential (primary) hypertension".to_string()),
        confidence: 1.0,
        source: Some(MatchSource::Exact),
        justification: "direct description match".to_string(),
        alternatives: vec![MappingCandidate {
            code: "I11.9".to_string(),
            description: "Hypertensive heart disease without heart failure".to_string(),
            confidence: 0.5,
            source: MatchSource::Fuzzy,
            condition: None,
        }],
    };
    let json = serde_json::to_string_pretty(&result).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "original_diagnosis": "HTN",
      "code": "I10",
      "description": "Essential (primary) hypertension",
      "confidence": 1.0,
      "source": "EXACT",
      "justification": "direct description match",
      "alternatives": [
        {
          "code": "I11.9",
          "description": "Hypertensive heart disease without heart failure",
          "confidence": 0.5,
          "source": "FUZZY"
        }
      ]
    }
    "#);

    let round: MappingResult = serde_json::from_str(&json).unwrap();
    assert_eq!(round, result);
}
