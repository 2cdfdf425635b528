//! Aggregate statistics over a mapping run.

use std::collections::{BTreeMap, BTreeSet};

use icd_model::{MappingResult, PatientMappings};
use serde::Serialize;

use crate::confidence::{ConfidenceLevel, ConfidenceThresholds};

/// Summary of a batch of mapping results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingStatistics {
    pub total_patients: usize,
    pub total_mappings: usize,
    /// Mean confidence over all mappings; 0.0 when there are none.
    pub average_confidence: f64,
    /// Mappings at or above the review threshold.
    pub high_confidence_count: usize,
    /// Mappings with no assigned code.
    pub unmapped_count: usize,
    /// Distinct assigned codes.
    pub unique_codes: usize,
    /// Mapping counts per level; every level is present.
    pub distribution: BTreeMap<ConfidenceLevel, usize>,
}

impl MappingStatistics {
    /// Computes statistics with the default confidence bands.
    ///
    /// `confidence_threshold` is the review threshold: mappings at or above
    /// it count as high confidence.
    #[must_use]
    pub fn from_results(results: &[PatientMappings], confidence_threshold: f64) -> Self {
        Self::from_results_with(
            results,
            confidence_threshold,
            &ConfidenceThresholds::default(),
        )
    }

    /// Computes statistics with custom confidence bands.
    #[must_use]
    pub fn from_results_with(
        results: &[PatientMappings],
        confidence_threshold: f64,
        thresholds: &ConfidenceThresholds,
    ) -> Self {
        let mut distribution: BTreeMap<ConfidenceLevel, usize> = ConfidenceLevel::DESCENDING
            .into_iter()
            .map(|level| (level, 0))
            .collect();
        let mut total_mappings = 0usize;
        let mut confidence_sum = 0.0;
        let mut high_confidence_count = 0usize;
        let mut unmapped_count = 0usize;
        let mut codes = BTreeSet::new();

        for mapping in results.iter().flat_map(|patient| &patient.mappings) {
            total_mappings += 1;
            confidence_sum += mapping.confidence;
            if mapping.confidence >= confidence_threshold {
                high_confidence_count += 1;
            }
            match mapping.code.as_deref() {
                Some(code) => {
                    codes.insert(code);
                }
                None => unmapped_count += 1,
            }
            *distribution
                .entry(thresholds.categorize(mapping.confidence))
                .or_insert(0) += 1;
        }

        let average_confidence = if total_mappings == 0 {
            0.0
        } else {
            confidence_sum / total_mappings as f64
        };

        Self {
            total_patients: results.len(),
            total_mappings,
            average_confidence,
            high_confidence_count,
            unmapped_count,
            unique_codes: codes.len(),
            distribution,
        }
    }

    /// Share of mappings satisfying a count, as a percentage.
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total_mappings == 0 {
            0.0
        } else {
            count as f64 / self.total_mappings as f64 * 100.0
        }
    }
}

/// A mapping below the review threshold, with its patient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewItem<'a> {
    pub patient_id: &'a str,
    pub mapping: &'a MappingResult,
}

/// Mappings that need manual review, in result order.
pub fn review_queue(results: &[PatientMappings], confidence_threshold: f64) -> Vec<ReviewItem<'_>> {
    results
        .iter()
        .flat_map(|patient| {
            patient
                .mappings
                .iter()
                .filter(move |mapping| mapping.needs_review(confidence_threshold))
                .map(move |mapping| ReviewItem {
                    patient_id: patient.patient_id.as_str(),
                    mapping,
                })
        })
        .collect()
}
