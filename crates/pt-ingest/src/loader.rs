use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, PlSmallStr, SerReader};

use crate::error::LoadError;
use crate::spreadsheet::read_spreadsheet;

/// File size above which CSV loading validates the schema against a prefix
/// sample before committing to full materialization. 10 MB.
pub const STREAMING_THRESHOLD_BYTES: u64 = 10 * 1024 * 1024;

/// Rows read for the schema prefix sample of a large CSV file.
pub const SCHEMA_SAMPLE_ROWS: usize = 100;

/// Reading strategy, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// `.xlsx` or `.xls`, read through the spreadsheet engine chain.
    Spreadsheet,
}

impl TableFormat {
    fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Spreadsheet),
            _ => Err(LoadError::UnsupportedExtension { extension }),
        }
    }
}

/// An input file plus its selected reading strategy.
///
/// For a large CSV the caller is expected to check the header of
/// [`TableSource::sample`] before calling [`TableSource::read_all`], so a
/// structurally broken file fails fast without being loaded entirely.
#[derive(Debug, Clone)]
pub struct TableSource {
    path: PathBuf,
    format: TableFormat,
}

impl TableSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        if !path.is_file() {
            return Err(LoadError::FileNotFound(path));
        }
        let format = TableFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// True when the file is a CSV at or above the streaming threshold.
    pub fn is_large(&self) -> Result<bool, LoadError> {
        if self.format != TableFormat::Csv {
            return Ok(false);
        }
        let metadata = std::fs::metadata(&self.path).map_err(|source| LoadError::Metadata {
            path: self.path.clone(),
            source,
        })?;
        Ok(metadata.len() >= STREAMING_THRESHOLD_BYTES)
    }

    /// Reads a bounded prefix of the table, enough to check the schema.
    /// Spreadsheets have no cheap prefix read and are loaded in full.
    pub fn sample(&self, rows: usize) -> Result<DataFrame, LoadError> {
        match self.format {
            TableFormat::Csv => self.read_csv(Some(rows)),
            TableFormat::Spreadsheet => read_spreadsheet(&self.path),
        }
    }

    /// Reads the entire table. Fails with [`LoadError::EmptyTable`] when the
    /// file parses but holds zero data rows.
    pub fn read_all(&self) -> Result<DataFrame, LoadError> {
        let df = match self.format {
            TableFormat::Csv => {
                if self.is_large()? {
                    tracing::debug!(path = %self.path.display(), "large CSV, full materialization");
                }
                self.read_csv(None)?
            }
            TableFormat::Spreadsheet => read_spreadsheet(&self.path)?,
        };
        if df.height() == 0 {
            return Err(LoadError::EmptyTable(self.path.clone()));
        }
        tracing::debug!(
            path = %self.path.display(),
            rows = df.height(),
            columns = df.width(),
            "table loaded"
        );
        Ok(df)
    }

    fn read_csv(&self, n_rows: Option<usize>) -> Result<DataFrame, LoadError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_n_rows(n_rows)
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|source| LoadError::Csv {
                path: self.path.clone(),
                source,
            })?
            .finish()
            .map_err(|source| LoadError::Csv {
                path: self.path.clone(),
                source,
            })?;
        normalize_headers(df).map_err(|source| LoadError::Csv {
            path: self.path.clone(),
            source,
        })
    }
}

/// Trims whitespace and a UTF-8 BOM from every header cell.
pub(crate) fn normalize_headers(
    mut df: DataFrame,
) -> Result<DataFrame, polars::error::PolarsError> {
    let names: Vec<PlSmallStr> = df
        .get_column_names()
        .iter()
        .map(|name| PlSmallStr::from_str(name.trim().trim_matches('\u{feff}').trim()))
        .collect();
    df.set_column_names(names)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_a_small_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.csv", "ParticipantID,Value\nL1,10.1\nL2,10.3\n");
        let source = TableSource::open(&path).unwrap();
        assert_eq!(source.format(), TableFormat::Csv);
        assert!(!source.is_large().unwrap());
        let df = source.read_all().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn missing_file_is_rejected_before_parsing() {
        let err = TableSource::open("/nonexistent/data.csv").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.parquet", "not a table");
        let err = TableSource::open(&path).unwrap_err();
        match err {
            LoadError::UnsupportedExtension { extension } => assert_eq!(extension, "parquet"),
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }

    #[test]
    fn header_only_csv_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "ParticipantID,Value\n");
        let source = TableSource::open(&path).unwrap();
        assert!(matches!(
            source.read_all(),
            Err(LoadError::EmptyTable(_))
        ));
    }

    #[test]
    fn sample_reads_a_bounded_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = String::from("ParticipantID,Value\n");
        for i in 0..50 {
            contents.push_str(&format!("L{i},10.{i}\n"));
        }
        let path = write_file(&dir, "data.csv", &contents);
        let source = TableSource::open(&path).unwrap();
        let sample = source.sample(10).unwrap();
        assert_eq!(sample.height(), 10);
    }

    #[test]
    fn headers_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.csv", "\u{feff}ParticipantID , Value\nL1,10.1\n");
        let source = TableSource::open(&path).unwrap();
        let df = source.read_all().unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["ParticipantID", "Value"]);
    }

    #[test]
    fn garbage_spreadsheet_aggregates_engine_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.xlsx", "this is not a zip archive");
        let source = TableSource::open(&path).unwrap();
        match source.read_all() {
            Err(LoadError::SpreadsheetEngines { attempts, .. }) => {
                assert!(attempts.len() >= 2, "expected every engine listed: {attempts:?}");
            }
            other => panic!("expected SpreadsheetEngines, got {other:?}"),
        }
    }
}
