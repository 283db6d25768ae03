//! Spreadsheet reading through an ordered list of backend engines.
//!
//! The format-specific engine runs first, then the auto-detecting engine as
//! a fallback for mislabeled files. The first engine that succeeds wins; if
//! every engine fails, the error carries one line per attempt.

use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook, open_workbook_auto};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PlSmallStr, Series};

use crate::error::LoadError;
use crate::loader::normalize_headers;
use crate::polars_utils::format_numeric;

/// Reads the first worksheet of a spreadsheet into a string-typed
/// `DataFrame`. Numeric typing happens later in the validation stage.
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mut attempts = Vec::new();
    let engines: &[&str] = match extension.as_str() {
        "xls" => &["xls", "auto"],
        _ => &["xlsx", "auto"],
    };
    for &engine in engines {
        let outcome = match engine {
            "xlsx" => read_with_xlsx(path),
            "xls" => read_with_xls(path),
            _ => read_with_auto(path),
        };
        match outcome {
            Ok(df) => {
                tracing::debug!(path = %path.display(), engine, "spreadsheet engine succeeded");
                return Ok(df);
            }
            Err(message) => attempts.push(format!("{engine}: {message}")),
        }
    }
    Err(LoadError::SpreadsheetEngines {
        path: path.to_path_buf(),
        attempts,
    })
}

fn read_with_xlsx(path: &Path) -> Result<DataFrame, String> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| e.to_string())?;
    let range = first_sheet_range(&mut workbook)?;
    range_to_dataframe(&range)
}

fn read_with_xls(path: &Path) -> Result<DataFrame, String> {
    let mut workbook: Xls<_> =
        open_workbook(path).map_err(|e: calamine::XlsError| e.to_string())?;
    let range = first_sheet_range(&mut workbook)?;
    range_to_dataframe(&range)
}

fn read_with_auto(path: &Path) -> Result<DataFrame, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let range = first_sheet_range(&mut workbook)?;
    range_to_dataframe(&range)
}

fn first_sheet_range<R: Reader<std::io::BufReader<std::fs::File>>>(
    workbook: &mut R,
) -> Result<Range<Data>, String>
where
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook contains no worksheets".to_string())?
        .map_err(|e| e.to_string())
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(v) => Some(format_numeric(*v)),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => Some(format_numeric(v.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}

fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame, String> {
    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| "worksheet is empty".to_string())?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| cell_to_string(cell).unwrap_or_else(|| format!("column_{}", i + 1)))
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(row.get(i).and_then(cell_to_string));
        }
    }

    let series: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(PlSmallStr::from_string(name), values).into_column())
        .collect();
    let df = DataFrame::new(series).map_err(|e| e.to_string())?;
    normalize_headers(df).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_convert_to_strings() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String("  L1 ".to_string())), Some("L1".to_string()));
        assert_eq!(cell_to_string(&Data::Float(10.5)), Some("10.5".to_string()));
        assert_eq!(cell_to_string(&Data::Int(3)), Some("3".to_string()));
        assert_eq!(cell_to_string(&Data::String("  ".to_string())), None);
    }

    #[test]
    fn range_becomes_string_dataframe() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("ParticipantID".to_string()));
        range.set_value((0, 1), Data::String("Value".to_string()));
        range.set_value((1, 0), Data::String("L1".to_string()));
        range.set_value((1, 1), Data::Float(10.1));
        range.set_value((2, 0), Data::String("L2".to_string()));
        range.set_value((2, 1), Data::Float(10.3));

        let df = range_to_dataframe(&range).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["ParticipantID", "Value"]);
    }

    #[test]
    fn missing_header_cells_get_positional_names() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("ParticipantID".to_string()));
        range.set_value((1, 0), Data::String("L1".to_string()));
        range.set_value((1, 1), Data::Float(10.1));

        let df = range_to_dataframe(&range).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["ParticipantID", "column_2"]);
    }
}
