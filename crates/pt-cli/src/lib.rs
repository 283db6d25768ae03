//! CLI library components for the proficiency testing analyzer.

pub mod logging;
pub mod pipeline;
