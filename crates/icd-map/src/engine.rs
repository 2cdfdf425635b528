//! Mapping engine implementation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use icd_model::{
    CatalogEntry, CatalogError, Category, MapperConfig, MappingCandidate, MappingResult,
    MatchSource, PatternRule,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::builtin::{builtin_catalog, builtin_rules};
use crate::catalog::Catalog;
use crate::normalize::normalize;
use crate::patterns::RuleSet;
use crate::privacy::redact_value;
use crate::score::match_fuzzy;

/// Justification for whitespace-only or empty input.
pub const EMPTY_INPUT_JUSTIFICATION: &str = "empty diagnosis text";
/// Justification when the best candidate is below the acceptance floor.
pub const NO_MATCH_JUSTIFICATION: &str =
    "no mapping met the minimum confidence threshold; manual review required";

/// Size of the loaded reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    pub total_codes: usize,
    pub total_rules: usize,
    pub categories: BTreeMap<Category, usize>,
}

/// Engine for mapping free-text diagnoses to catalog codes.
///
/// The engine combines three strategies: exact lookup of the normalized
/// description, keyword pattern rules, and fuzzy similarity. Each diagnosis
/// is mapped independently; the catalog and rules are shared read-only, so a
/// single engine can serve many threads.
///
/// # Example
///
/// ```
/// use icd_map::MappingEngine;
/// use icd_model::MapperConfig;
///
/// let engine = MappingEngine::builtin().unwrap();
/// let result = engine.map_diagnosis("high blood pressure", &MapperConfig::default());
/// assert_eq!(result.code.as_deref(), Some("I10"));
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    catalog: Arc<Catalog>,
    rules: Arc<RuleSet>,
}

struct Ranked {
    candidate: MappingCandidate,
    position: usize,
}

impl MappingEngine {
    /// Creates an engine from raw reference data.
    ///
    /// Fails if the catalog is malformed or any rule references a code absent
    /// from it.
    pub fn new(catalog: Vec<CatalogEntry>, rules: Vec<PatternRule>) -> Result<Self, CatalogError> {
        let catalog = Catalog::new(catalog)?;
        let rules = RuleSet::compile(rules, &catalog)?;
        info!(
            codes = catalog.len(),
            rules = rules.len(),
            "mapping engine initialized"
        );
        Ok(Self {
            catalog: Arc::new(catalog),
            rules: Arc::new(rules),
        })
    }

    /// Creates an engine over the built-in catalog and rules.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_catalog(), builtin_rules())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn catalog_statistics(&self) -> CatalogStatistics {
        CatalogStatistics {
            total_codes: self.catalog.len(),
            total_rules: self.rules.len(),
            categories: self.catalog.category_counts(),
        }
    }

    /// Maps one diagnosis.
    ///
    /// Never fails: empty input and inputs without an acceptable candidate
    /// produce a result with no code that the caller routes to review.
    pub fn map_diagnosis(&self, text: &str, config: &MapperConfig) -> MappingResult {
        let normalized = normalize(text);
        if normalized.is_empty() {
            debug!(diagnosis = redact_value(text), "empty diagnosis text");
            return MappingResult::unmapped(text, EMPTY_INPUT_JUSTIFICATION, Vec::new());
        }

        let mut ranked = self.ranked_candidates(&normalized, config).into_iter();
        let best = ranked.next();
        let result = match best {
            Some(best) if best.confidence >= config.acceptance_floor => {
                let alternatives = ranked
                    .filter(|c| c.code != best.code)
                    .take(config.max_suggestions)
                    .collect();
                MappingResult {
                    original_diagnosis: text.to_string(),
                    justification: justification(&best),
                    code: Some(best.code),
                    description: Some(best.description),
                    confidence: best.confidence,
                    source: Some(best.source),
                    alternatives,
                }
            }
            Some(best) => {
                let alternatives = std::iter::once(best)
                    .chain(ranked)
                    .take(config.max_suggestions)
                    .collect();
                MappingResult::unmapped(text, NO_MATCH_JUSTIFICATION, alternatives)
            }
            None => MappingResult::unmapped(text, NO_MATCH_JUSTIFICATION, Vec::new()),
        };

        debug!(
            diagnosis = redact_value(text),
            code = result.code.as_deref().unwrap_or("-"),
            source = result.source.map_or("-", |s| s.as_str()),
            confidence = result.confidence,
            alternatives = result.alternatives.len(),
            "mapped diagnosis"
        );
        result
    }

    /// Merged candidates for already-normalized text, best first.
    ///
    /// Candidates for the same code are merged keeping the highest
    /// confidence; on equal confidence the higher-precedence source wins.
    /// The list is ordered by confidence, then source precedence, then
    /// catalog order.
    pub fn ranked_candidates(
        &self,
        normalized: &str,
        config: &MapperConfig,
    ) -> Vec<MappingCandidate> {
        let exact = self
            .catalog
            .exact_matches(normalized)
            .map(|entry| MappingCandidate {
                code: entry.code.clone(),
                description: entry.description.clone(),
                confidence: 1.0,
                source: MatchSource::Exact,
                condition: None,
            });
        let pattern = self.rules.match_patterns(normalized);
        let fuzzy = match_fuzzy(normalized, &self.catalog, config);
        trace!(
            pattern = pattern.len(),
            fuzzy = fuzzy.len(),
            "collected candidates"
        );

        let mut merged: BTreeMap<usize, MappingCandidate> = BTreeMap::new();
        for candidate in exact.chain(pattern).chain(fuzzy) {
            let Some(position) = self.catalog.position(&candidate.code) else {
                continue;
            };
            let replace = merged
                .get(&position)
                .is_none_or(|existing| supersedes(&candidate, existing));
            if replace {
                merged.insert(position, candidate);
            }
        }

        let mut ranked: Vec<Ranked> = merged
            .into_iter()
            .map(|(position, candidate)| Ranked {
                candidate,
                position,
            })
            .collect();
        ranked.sort_by(compare_ranked);
        ranked.into_iter().map(|r| r.candidate).collect()
    }

    /// Maps each diagnosis in order.
    pub fn map_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        config: &MapperConfig,
    ) -> Vec<MappingResult> {
        self.map_batch_with_progress(texts, config, |_, _| {})
    }

    /// Maps each diagnosis in order, calling `progress(done, total)` after
    /// every element.
    pub fn map_batch_with_progress<S, F>(
        &self,
        texts: &[S],
        config: &MapperConfig,
        mut progress: F,
    ) -> Vec<MappingResult>
    where
        S: AsRef<str>,
        F: FnMut(usize, usize),
    {
        let total = texts.len();
        let mut results = Vec::with_capacity(total);
        for (idx, text) in texts.iter().enumerate() {
            results.push(self.map_diagnosis(text.as_ref(), config));
            progress(idx + 1, total);
        }
        results
    }

    /// Maps diagnoses across the rayon thread pool. Results are in input order.
    pub fn map_batch_parallel<S>(&self, texts: &[S], config: &MapperConfig) -> Vec<MappingResult>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.map_diagnosis(text.as_ref(), config))
            .collect()
    }
}

fn supersedes(candidate: &MappingCandidate, existing: &MappingCandidate) -> bool {
    candidate.confidence > existing.confidence
        || (candidate.confidence == existing.confidence
            && candidate.source.precedence() < existing.source.precedence())
}

fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    b.candidate
        .confidence
        .partial_cmp(&a.candidate.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.candidate.source.cmp(&b.candidate.source))
        .then_with(|| a.position.cmp(&b.position))
}

fn justification(candidate: &MappingCandidate) -> String {
    match candidate.source {
        MatchSource::Exact => "direct description match".to_string(),
        MatchSource::Pattern => format!(
            "matched keyword pattern for {}",
            candidate.condition.as_deref().unwrap_or(&candidate.description)
        ),
        MatchSource::Fuzzy => format!(
            "approximate text similarity (score={:.2})",
            candidate.confidence
        ),
    }
}
