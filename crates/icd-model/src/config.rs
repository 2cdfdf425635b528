use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable thresholds for a mapping run.
///
/// Every field has a default, so a partial TOML document such as
/// `max_suggestions = 5` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Results below this confidence are flagged for review (default: 0.7).
    pub confidence_threshold: f64,
    /// Maximum number of alternatives per result (default: 3).
    pub max_suggestions: usize,
    /// Minimum best-candidate confidence for a code to be assigned (default: 0.3).
    pub acceptance_floor: f64,
    /// Minimum similarity for a fuzzy candidate (default: 0.5).
    pub fuzzy_floor: f64,
    /// Number of fuzzy candidates kept per diagnosis (default: 10).
    pub fuzzy_top_k: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            max_suggestions: 3,
            acceptance_floor: 0.3,
            fuzzy_floor: 0.5,
            fuzzy_top_k: 10,
        }
    }
}

impl MapperConfig {
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Checks that every threshold is a number within [0, 1] and that at
    /// least one fuzzy candidate can be kept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("acceptance_floor", self.acceptance_floor),
            ("fuzzy_floor", self.fuzzy_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.fuzzy_top_k == 0 {
            return Err(ConfigError::Zero {
                field: "fuzzy_top_k",
            });
        }
        Ok(())
    }
}
