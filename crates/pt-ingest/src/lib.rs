//! Input table loading.
//!
//! A [`TableSource`] selects a reading strategy from the file extension:
//! CSV through the polars reader (with a bounded prefix sample for large
//! files so schema problems fail before full materialization), spreadsheets
//! through an ordered list of backend engines. Cell typing is left to the
//! validation stage; this crate only produces a [`polars`] `DataFrame`.

mod error;
mod loader;
mod polars_utils;
mod spreadsheet;

pub use error::LoadError;
pub use loader::{
    STREAMING_THRESHOLD_BYTES, SCHEMA_SAMPLE_ROWS, TableFormat, TableSource,
};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric};
pub use spreadsheet::read_spreadsheet;
