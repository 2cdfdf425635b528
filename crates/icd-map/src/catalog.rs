use std::collections::{BTreeMap, HashMap};

use icd_model::{CatalogEntry, CatalogError, Category, is_valid_code};

use crate::normalize::normalize;

/// Validated, read-only code catalog.
///
/// Keeps each entry's normalized description alongside it so that exact and
/// similarity matching never re-normalize the reference side.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    normalized: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting malformed or duplicate codes and
    /// descriptions that normalize to nothing.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(entries.len());
        let mut normalized = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if !is_valid_code(&entry.code) {
                return Err(CatalogError::InvalidCode(entry.code.clone()));
            }
            if positions.insert(entry.code.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCode(entry.code.clone()));
            }
            let key = normalize(&entry.description);
            if key.is_empty() {
                return Err(CatalogError::EmptyDescription {
                    code: entry.code.clone(),
                });
            }
            normalized.push(key);
        }
        Ok(Self {
            entries,
            normalized,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.position(code).map(|idx| &self.entries[idx])
    }

    /// Insertion index of `code`, used as the final tie-breaker in rankings.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    /// Entries paired with their normalized descriptions, in insertion order.
    pub fn iter_normalized(&self) -> impl Iterator<Item = (&CatalogEntry, &str)> {
        self.entries
            .iter()
            .zip(self.normalized.iter().map(String::as_str))
    }

    /// Entries whose normalized description equals `normalized`.
    pub fn exact_matches<'a>(
        &'a self,
        normalized: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.iter_normalized()
            .filter(move |(_, key)| *key == normalized)
            .map(|(entry, _)| entry)
    }

    /// Number of codes per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        counts
    }
}
