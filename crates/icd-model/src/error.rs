use thiserror::Error;

/// Integrity errors detected while assembling a catalog or rule set.
///
/// These are startup-time failures: an engine is never constructed from
/// inconsistent reference data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate catalog code: {0}")]
    DuplicateCode(String),
    #[error("malformed catalog code: {0:?}")]
    InvalidCode(String),
    #[error("catalog entry {code} has an empty description")]
    EmptyDescription { code: String },
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("rule for {condition:?} references code {code} which is not in the catalog")]
    UnknownRuleCode { condition: String, code: String },
    #[error("rule for {condition:?} has no usable keywords")]
    EmptyKeywords { condition: String },
    #[error("rule for {condition:?} has confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange { condition: String, value: f64 },
}

/// Invalid mapper configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}
