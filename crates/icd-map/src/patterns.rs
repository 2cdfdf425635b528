use icd_model::{CatalogError, MappingCandidate, MatchSource, PatternRule};

use crate::catalog::Catalog;
use crate::normalize::{normalize, tokens};

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: PatternRule,
    description: String,
    // Each keyword as a normalized token sequence; never empty.
    phrases: Vec<Vec<String>>,
}

/// Pattern rules checked against a catalog and pre-normalized for matching.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compiles `rules` against `catalog`.
    ///
    /// Every rule must target a catalog code, carry a confidence within
    /// [0, 1], and have at least one keyword; no keyword may normalize to
    /// nothing.
    pub fn compile(rules: Vec<PatternRule>, catalog: &Catalog) -> Result<Self, CatalogError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let Some(entry) = catalog.get(&rule.code) else {
                return Err(CatalogError::UnknownRuleCode {
                    condition: rule.condition,
                    code: rule.code,
                });
            };
            if !(0.0..=1.0).contains(&rule.base_confidence) {
                return Err(CatalogError::ConfidenceOutOfRange {
                    condition: rule.condition,
                    value: rule.base_confidence,
                });
            }
            let phrases: Vec<Vec<String>> = rule
                .keywords
                .iter()
                .map(|keyword| {
                    tokens(&normalize(keyword))
                        .into_iter()
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .collect();
            if phrases.is_empty() || phrases.iter().any(Vec::is_empty) {
                return Err(CatalogError::EmptyKeywords {
                    condition: rule.condition,
                });
            }
            compiled.push(CompiledRule {
                description: entry.description.clone(),
                rule,
                phrases,
            });
        }
        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Returns one candidate per code for every firing rule.
    ///
    /// A rule fires when each of its keywords occurs in `normalized` as a
    /// contiguous run of whole tokens. Only the first firing rule for a code
    /// contributes.
    pub fn match_patterns(&self, normalized: &str) -> Vec<MappingCandidate> {
        let text_tokens = tokens(normalized);
        let mut candidates: Vec<MappingCandidate> = Vec::new();
        for compiled in &self.rules {
            if candidates.iter().any(|c| c.code == compiled.rule.code) {
                continue;
            }
            if compiled
                .phrases
                .iter()
                .all(|phrase| contains_phrase(&text_tokens, phrase))
            {
                candidates.push(MappingCandidate {
                    code: compiled.rule.code.clone(),
                    description: compiled.description.clone(),
                    confidence: compiled.rule.base_confidence,
                    source: MatchSource::Pattern,
                    condition: Some(compiled.rule.condition.clone()),
                });
            }
        }
        candidates
    }
}

fn contains_phrase(text: &[&str], phrase: &[String]) -> bool {
    text.windows(phrase.len())
        .any(|window| window.iter().zip(phrase).all(|(token, word)| *token == word.as_str()))
}

#[cfg(test)]
mod tests {
    use icd_model::{CatalogEntry, Category};

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("I10", "Essential (primary) hypertension", Category::Cardiovascular),
            CatalogEntry::new("E11.9", "Type 2 diabetes mellitus", Category::Endocrine),
        ])
        .unwrap()
    }

    #[test]
    fn rule_fires_only_when_all_keywords_present() {
        let rules = RuleSet::compile(
            vec![PatternRule::new("type 2 diabetes", ["diabetes", "type 2"], "E11.9", 0.9)],
            &catalog(),
        )
        .unwrap();
        assert_eq!(rules.match_patterns("type 2 diabetes").len(), 1);
        assert!(rules.match_patterns("diabetes insipidus").is_empty());
    }

    #[test]
    fn keywords_match_whole_tokens_only() {
        let rules = RuleSet::compile(
            vec![PatternRule::new("hypertension", ["tension"], "I10", 0.8)],
            &catalog(),
        )
        .unwrap();
        assert!(rules.match_patterns("hypertension").is_empty());
        assert_eq!(rules.match_patterns("tension headache").len(), 1);
    }

    #[test]
    fn first_rule_per_code_wins() {
        let rules = RuleSet::compile(
            vec![
                PatternRule::new("high blood pressure", ["high blood pressure"], "I10", 0.85),
                PatternRule::new("blood pressure", ["blood pressure"], "I10", 0.6),
            ],
            &catalog(),
        )
        .unwrap();
        let hits = rules.match_patterns("high blood pressure");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].confidence, 0.85);
        assert_eq!(hits[0].condition.as_deref(), Some("high blood pressure"));
        assert_eq!(hits[0].description, "Essential (primary) hypertension");
    }

    #[test]
    fn keywords_are_normalized_like_input() {
        let rules = RuleSet::compile(
            vec![PatternRule::new("hypertension", ["HTN"], "I10", 0.8)],
            &catalog(),
        )
        .unwrap();
        assert_eq!(rules.match_patterns(&normalize("htn")).len(), 1);
    }

    #[test]
    fn rejects_rules_for_unknown_codes() {
        let err = RuleSet::compile(
            vec![PatternRule::new("anxiety", ["anxiety"], "F41.9", 0.8)],
            &catalog(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownRuleCode {
                condition: "anxiety".to_string(),
                code: "F41.9".to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_keywords_and_bad_confidence() {
        let err = RuleSet::compile(
            vec![PatternRule::new("nothing", ["nos"], "I10", 0.8)],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyKeywords { .. }));

        let err = RuleSet::compile(
            vec![PatternRule::new("pressure", ["pressure"], "I10", 1.2)],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::ConfidenceOutOfRange { .. }));
    }
}
