//! Weigh-in / sodium file ingest.
//!
//! Files are either a JSON array of records or a CSV with a header row whose
//! column names match the record members (`date`, `logged_at`, `weighed_at`,
//! `weight`, `sodium`). Unknown columns are ignored.
//!
//! Ingest never judges dates or values; that is the cleaner's job. It only
//! turns bytes into records and reports rows it could not read at all.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::AppError;

/// Input encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(AppError::new(
                2,
                format!("Unsupported input '{}': expected a .json or .csv file.", path.display()),
            )),
        }
    }
}

/// A row that could not be decoded.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: decoded records plus what was skipped.
#[derive(Debug, Clone)]
pub struct Ingested<R> {
    pub records: Vec<R>,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

/// Load records from a JSON or CSV file.
pub fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Ingested<R>, AppError> {
    let format = InputFormat::from_path(path)?;
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    let ingested = match format {
        InputFormat::Json => read_json(file, path)?,
        InputFormat::Csv => read_csv(file)?,
    };

    for err in &ingested.row_errors {
        warn!(line = err.line, "{}", err.message);
    }
    info!(
        path = %path.display(),
        rows = ingested.rows_read,
        decoded = ingested.records.len(),
        "loaded records"
    );
    Ok(ingested)
}

fn read_json<R: DeserializeOwned>(reader: impl std::io::Read, path: &Path) -> Result<Ingested<R>, AppError> {
    // `null` entries are legal and skipped.
    let rows: Vec<Option<R>> = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(2, format!("Invalid JSON in '{}': {e}", path.display())))?;
    let rows_read = rows.len();
    Ok(Ingested {
        records: rows.into_iter().flatten().collect(),
        rows_read,
        row_errors: Vec::new(),
    })
}

fn read_csv<R: DeserializeOwned>(reader: impl std::io::Read) -> Result<Ingested<R>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
    let headers: StringRecord = headers.iter().map(normalize_header_name).collect();

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Data starts on line 2.
        let line = idx + 2;
        rows_read += 1;

        let decoded = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|row| row_as_text::<R>(&headers, &row).map_err(|e| format!("Undecodable row: {e}")));
        match decoded {
            Ok(r) => records.push(r),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(Ingested {
        records,
        rows_read,
        row_errors,
    })
}

/// Decode one row with every cell presented as text.
///
/// CSV has no cell types; letting the reader guess would turn a date cell
/// such as `20260115` into a number and make it a hard error instead of an
/// unparseable date.
fn row_as_text<R: DeserializeOwned>(headers: &StringRecord, row: &StringRecord) -> Result<R, serde_json::Error> {
    let cells: Map<String, Value> = headers
        .iter()
        .zip(row.iter())
        .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
        .collect();
    serde_json::from_value(Value::Object(cells))
}

/// Lowercase, trim and strip a UTF-8 BOM (spreadsheet exports add one to the
/// first header).
pub(crate) fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateLike, DatedRecord, SodiumRecord, WeighInRecord};
    use crate::plateau::clean::clean_series;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a/b.JSON")).unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("w.csv")).unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("w.txt")).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn json_skips_null_entries() {
        let body = r#"[{"date": "2026-01-01", "weight": 150.2}, null, {"logged_at": "2026-01-02T07:00:00Z", "weight": 150}]"#;
        let out: Ingested<WeighInRecord> = read_json(body.as_bytes(), Path::new("mem.json")).unwrap();
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].extract_date().map(|(f, _)| f), Some("logged_at"));
    }

    #[test]
    fn csv_maps_headers_case_insensitively() {
        let body = "\u{feff}Logged_At, Weight ,note\n2026-01-01T06:30:00Z,150.4,morning\n2026-01-02,,skipped later\n";
        let out: Ingested<WeighInRecord> = read_csv(body.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 2);
        assert!(out.row_errors.is_empty());
        assert_eq!(out.records[0].value(), Some(150.4));
        assert_eq!(out.records[1].value(), None);
    }

    #[test]
    fn csv_date_cells_stay_text() {
        let body = "date,weight\n20260115,150.0\ntrue,150.1\n2026-01-16,150.2\n";
        let out: Ingested<WeighInRecord> = read_csv(body.as_bytes()).unwrap();
        assert!(out.row_errors.is_empty());
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].date, Some(DateLike::Text("20260115".to_string())));
        assert_eq!(out.records[1].date, Some(DateLike::Text("true".to_string())));

        let cleaned = clean_series(&out.records).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].value, 150.2);
    }

    #[test]
    fn csv_sodium_rows() {
        let body = "date,sodium\n2026-01-01,2450\n2026-01-02,\n";
        let out: Ingested<SodiumRecord> = read_csv(body.as_bytes()).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].value(), Some(2450.0));
    }
}
