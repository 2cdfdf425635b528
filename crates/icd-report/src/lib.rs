//! Export formats and summary statistics for mapping results.

pub mod confidence;
pub mod error;
pub mod export;
pub mod stats;
pub mod text;

pub use confidence::{ConfidenceLevel, ConfidenceThresholds};
pub use error::{ReportError, Result};
pub use export::{UNKNOWN_CODE, format_alternatives, to_json, write_csv};
pub use stats::{MappingStatistics, ReviewItem, review_queue};
pub use text::render_text_report;
