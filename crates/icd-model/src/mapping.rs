//! Mapping candidate and result types.
//!
//! A [`MappingResult`] is the structured decision the engine returns for one
//! diagnosis string. Its JSON form is the field-for-field serialization, with
//! alternatives nested as an array of [`MappingCandidate`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy that produced a candidate.
///
/// Ordering follows precedence: `Exact` sorts before `Pattern`, which sorts
/// before `Fuzzy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchSource {
    /// Normalized description equals the normalized input.
    Exact,
    /// A keyword pattern rule fired.
    Pattern,
    /// Approximate string similarity.
    Fuzzy,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Exact => "EXACT",
            MatchSource::Pattern => "PATTERN",
            MatchSource::Fuzzy => "FUZZY",
        }
    }

    /// Rank used for tie-breaking; lower wins.
    pub fn precedence(&self) -> u8 {
        match self {
            MatchSource::Exact => 0,
            MatchSource::Pattern => 1,
            MatchSource::Fuzzy => 2,
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A possible code for one diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingCandidate {
    /// Catalog code.
    pub code: String,
    /// Catalog description for the code.
    pub description: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Strategy that produced the candidate.
    pub source: MatchSource,
    /// Condition name of the firing rule, for pattern candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Final mapping decision for one diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    /// Diagnosis text exactly as supplied.
    pub original_diagnosis: String,
    /// Chosen code, or `None` when manual review is required.
    pub code: Option<String>,
    /// Description of the chosen code.
    pub description: Option<String>,
    /// Confidence in the chosen code; 0.0 when no code was chosen.
    pub confidence: f64,
    /// Strategy behind the chosen code.
    pub source: Option<MatchSource>,
    /// Short human-readable rationale.
    pub justification: String,
    /// Ranked alternatives, excluding the chosen code.
    pub alternatives: Vec<MappingCandidate>,
}

impl MappingResult {
    /// Result with no code and the given rationale.
    pub fn unmapped(
        original: &str,
        justification: impl Into<String>,
        alternatives: Vec<MappingCandidate>,
    ) -> Self {
        Self {
            original_diagnosis: original.to_string(),
            code: None,
            description: None,
            confidence: 0.0,
            source: None,
            justification: justification.into(),
            alternatives,
        }
    }

    /// Returns true if a code was assigned.
    pub fn is_mapped(&self) -> bool {
        self.code.is_some()
    }

    /// Returns true if the result should be checked by a person: either no
    /// code was assigned or the confidence is below `threshold`.
    pub fn needs_review(&self, threshold: f64) -> bool {
        !self.is_mapped() || self.confidence < threshold
    }
}
