#![deny(unsafe_code)]

pub mod builtin;
pub mod catalog;
pub mod engine;
pub mod normalize;
pub mod patterns;
pub mod privacy;
pub mod score;

pub use builtin::{builtin_catalog, builtin_rules};
pub use catalog::Catalog;
pub use engine::{
    CatalogStatistics, EMPTY_INPUT_JUSTIFICATION, MappingEngine, NO_MATCH_JUSTIFICATION,
};
pub use normalize::normalize;
pub use patterns::RuleSet;
pub use score::{FUZZY_CEILING, match_fuzzy, similarity};
