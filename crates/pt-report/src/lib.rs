//! Report aggregation and rendering.
//!
//! [`aggregate`] is a pure merge of validated records, the optional
//! calculation outcome, and the configuration used; [`render_report`] hands
//! the result to an external Quarto installation. A missing renderer and a
//! failed render are distinct errors so the operator sees the difference
//! between "install quarto" and "fix the template".

mod dataset;
mod render;

pub use dataset::{ReportDataset, aggregate};
pub use render::{ReportError, render_report};
