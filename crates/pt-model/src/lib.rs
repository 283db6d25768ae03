//! Shared data model for the proficiency-testing pipeline.

mod mapping;
mod method;
mod record;
mod result;
mod stats;

pub use mapping::ColumnMapping;
pub use method::{CalculationMethod, ParseMethodError};
pub use record::{ParticipantRecord, RecordError, ValidationIssue, format_issues};
pub use result::{CalculationResult, PersistedResults};
pub use stats::SummaryStatistics;
