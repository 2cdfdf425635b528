#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod mapping;
pub mod patient;
pub mod rule;

pub use catalog::{CatalogEntry, Category, is_valid_code};
pub use config::MapperConfig;
pub use error::{CatalogError, ConfigError};
pub use mapping::{MappingCandidate, MappingResult, MatchSource};
pub use patient::{PatientMappings, PatientRecord};
pub use rule::PatternRule;
