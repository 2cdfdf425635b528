//! Approximate string similarity between diagnoses and catalog descriptions.
//!
//! Uses the normalized Indel similarity (the classic "ratio") as the base
//! algorithm, plus token-sort and token-set variants so that word order
//! differences are tolerated. Every score is in [0, 1].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use icd_model::{MapperConfig, MappingCandidate, MatchSource};
use rapidfuzz::distance::indel;

use crate::catalog::Catalog;

/// Highest confidence a fuzzy candidate can carry; 1.0 is reserved for exact
/// description matches.
pub const FUZZY_CEILING: f64 = 0.99;

/// Character-level similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

/// Similarity after sorting each side's tokens alphabetically.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Similarity with shared tokens aligned at the front of both sides.
///
/// Each side is rewritten as its sorted shared tokens followed by its own
/// sorted remainder. Tokens present on only one side still lower the score,
/// so a short input contained in a long description does not score 1.0.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();
    let shared: Vec<&str> = left.intersection(&right).copied().collect();
    let only_left: Vec<&str> = left.difference(&right).copied().collect();
    let only_right: Vec<&str> = right.difference(&left).copied().collect();

    let shared_text = shared.join(" ");
    ratio(
        &join_nonempty(&shared_text, &only_left),
        &join_nonempty(&shared_text, &only_right),
    )
}

/// Best of the straight, token-sort and token-set ratios, clamped to [0, 1].
pub fn similarity(a: &str, b: &str) -> f64 {
    let score = ratio(a, b)
        .max(token_sort_ratio(a, b))
        .max(token_set_ratio(a, b));
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Scores `normalized` against every catalog description.
///
/// Returns candidates scoring at least `config.fuzzy_floor`, highest first,
/// ties in catalog order, at most `config.fuzzy_top_k` of them. Confidence is
/// capped at [`FUZZY_CEILING`].
pub fn match_fuzzy(
    normalized: &str,
    catalog: &Catalog,
    config: &MapperConfig,
) -> Vec<MappingCandidate> {
    let mut candidates: Vec<MappingCandidate> = catalog
        .iter_normalized()
        .filter_map(|(entry, description)| {
            let score = similarity(normalized, description);
            (score >= config.fuzzy_floor).then(|| MappingCandidate {
                code: entry.code.clone(),
                description: entry.description.clone(),
                confidence: score.min(FUZZY_CEILING),
                source: MatchSource::Fuzzy,
                condition: None,
            })
        })
        .collect();

    // Stable sort keeps catalog order among equal scores.
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(config.fuzzy_top_k);
    candidates
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_nonempty(shared: &str, rest: &[&str]) -> String {
    match (shared.is_empty(), rest.is_empty()) {
        (true, _) => rest.join(" "),
        (false, true) => shared.to_string(),
        (false, false) => format!("{shared} {}", rest.join(" ")),
    }
}
