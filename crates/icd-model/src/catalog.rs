//! Classification catalog types.
//!
//! A catalog is a table of ICD-10-CM codes, each with a description and the
//! chapter-level category it belongs to. Entries are immutable once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Chapter-level grouping of catalog codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Endocrine,
    Cardiovascular,
    Respiratory,
    Genitourinary,
    Mental,
    Neoplasms,
    Infectious,
    Blood,
    Symptoms,
    Digestive,
    Skin,
    Injury,
    Factors,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 13] = [
        Category::Endocrine,
        Category::Cardiovascular,
        Category::Respiratory,
        Category::Genitourinary,
        Category::Mental,
        Category::Neoplasms,
        Category::Infectious,
        Category::Blood,
        Category::Symptoms,
        Category::Digestive,
        Category::Skin,
        Category::Injury,
        Category::Factors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Endocrine => "Endocrine",
            Category::Cardiovascular => "Cardiovascular",
            Category::Respiratory => "Respiratory",
            Category::Genitourinary => "Genitourinary",
            Category::Mental => "Mental",
            Category::Neoplasms => "Neoplasms",
            Category::Infectious => "Infectious",
            Category::Blood => "Blood",
            Category::Symptoms => "Symptoms",
            Category::Digestive => "Digestive",
            Category::Skin => "Skin",
            Category::Injury => "Injury",
            Category::Factors => "Factors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Parse a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::UnknownCategory(trimmed.to_string()))
    }
}

/// One row of the classification catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// ICD-10-CM code, e.g. `E11.9`.
    pub code: String,
    /// Official description of the code.
    pub description: String,
    /// Chapter-level category.
    pub category: Category,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            category,
        }
    }
}

/// Returns true if `code` has the ICD-10 shape: an uppercase letter, two digits
/// or uppercase letters, and an optional dot followed by one to four more.
///
/// ```
/// use icd_model::is_valid_code;
///
/// assert!(is_valid_code("E11.9"));
/// assert!(is_valid_code("S72.001A"));
/// assert!(is_valid_code("Z66"));
/// assert!(!is_valid_code("UNKNOWN"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    let (stem, extension) = match code.split_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (code, None),
    };
    let mut chars = stem.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    if rest.len() != 2 || !rest.iter().copied().all(is_code_char) {
        return false;
    }
    match extension {
        None => true,
        Some(ext) => (1..=4).contains(&ext.len()) && ext.chars().all(is_code_char),
    }
}

fn is_code_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch.is_ascii_uppercase()
}
