use serde::{Deserialize, Serialize};

/// A keyword heuristic that links a phrasing to one catalog code.
///
/// A rule fires when every keyword occurs in the normalized diagnosis text.
/// In well-formed tables a rule whose keywords contain another rule's
/// keywords is more specific and carries at least that rule's
/// `base_confidence`. Rules with unrelated keywords are not ordered against
/// each other, even when both fire on the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Human-readable condition name used in justifications.
    pub condition: String,
    /// Keywords (single words or phrases) that must all be present.
    pub keywords: Vec<String>,
    /// Target catalog code.
    pub code: String,
    /// Confidence assigned to a firing rule (0.0 to 1.0).
    #[serde(rename = "confidence")]
    pub base_confidence: f64,
}

impl PatternRule {
    pub fn new<I, S>(condition: &str, keywords: I, code: &str, base_confidence: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            condition: condition.to_string(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            code: code.to_string(),
            base_confidence,
        }
    }
}
