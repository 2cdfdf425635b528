//! CLI library components for the diagnosis mapper.

pub mod logging;
pub mod pipeline;
