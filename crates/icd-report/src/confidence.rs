//! Confidence bands for mapping quality assessment.

use std::fmt;

use serde::Serialize;

/// Confidence level categories for reviewing mapping results.
///
/// - `VeryHigh`: near-certain matches that can be used without review
/// - `High`: good matches that should be spot-checked
/// - `Medium`: plausible matches that need review
/// - `Low`: weak or missing matches requiring manual coding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Below the medium threshold, including unmapped diagnoses.
    Low,
    /// At or above the medium threshold.
    Medium,
    /// At or above the high threshold.
    High,
    /// At or above the very-high threshold.
    VeryHigh,
}

impl ConfidenceLevel {
    /// All levels from strongest to weakest, the order reports list them in.
    pub const DESCENDING: [ConfidenceLevel; 4] = [
        ConfidenceLevel::VeryHigh,
        ConfidenceLevel::High,
        ConfidenceLevel::Medium,
        ConfidenceLevel::Low,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryHigh => "very high confidence - likely correct",
            Self::High => "high confidence - spot check",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs manual coding",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boundaries between confidence levels.
///
/// - Below `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - `high` to `very_high`: [`ConfidenceLevel::High`]
/// - At or above `very_high`: [`ConfidenceLevel::VeryHigh`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for very-high matches (default: 0.9).
    pub very_high: f64,
    /// Minimum confidence for high matches (default: 0.7).
    pub high: f64,
    /// Minimum confidence for medium matches (default: 0.5).
    pub medium: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            very_high: 0.9,
            high: 0.7,
            medium: 0.5,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score into a confidence level.
    #[must_use]
    pub fn categorize(&self, confidence: f64) -> ConfidenceLevel {
        if confidence >= self.very_high {
            ConfidenceLevel::VeryHigh
        } else if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Human-readable range for a level, such as `0.7-0.9`.
    #[must_use]
    pub fn range_label(&self, level: ConfidenceLevel) -> String {
        match level {
            ConfidenceLevel::VeryHigh => format!(">={}", self.very_high),
            ConfidenceLevel::High => format!("{}-{}", self.high, self.very_high),
            ConfidenceLevel::Medium => format!("{}-{}", self.medium, self.high),
            ConfidenceLevel::Low => format!("<{}", self.medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_uses_inclusive_lower_bounds() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(1.0), ConfidenceLevel::VeryHigh);
        assert_eq!(thresholds.categorize(0.9), ConfidenceLevel::VeryHigh);
        assert_eq!(thresholds.categorize(0.89), ConfidenceLevel::High);
        assert_eq!(thresholds.categorize(0.7), ConfidenceLevel::High);
        assert_eq!(thresholds.categorize(0.5), ConfidenceLevel::Medium);
        assert_eq!(thresholds.categorize(0.49), ConfidenceLevel::Low);
        assert_eq!(thresholds.categorize(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn levels_order_weakest_first() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::High < ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn range_labels() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.range_label(ConfidenceLevel::VeryHigh), ">=0.9");
        assert_eq!(thresholds.range_label(ConfidenceLevel::High), "0.7-0.9");
        assert_eq!(thresholds.range_label(ConfidenceLevel::Low), "<0.5");
    }
}
