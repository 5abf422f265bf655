//! CSV loader for the sales dataset
//!
//! - Header lookup is by exact column name; extra columns are ignored
//! - Rows with a missing year are dropped, nothing else is cleaned
//! - Any other unparseable numeric cell fails the whole load

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::observability::{self, Event, ObservationScope};

use super::cache::GLOBAL_CACHE;
use super::errors::{DataLoadError, DataLoadResult};
use super::record::SalesRecord;
use super::table::SalesTable;

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
];

/// Spellings of a missing value in the source data, matched exactly
const MISSING_YEAR: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Outcome of parsing one input
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: SalesTable,
    /// Data rows seen, excluding the header
    pub rows_read: usize,
    /// Rows dropped for a missing year
    pub rows_dropped: usize,
}

/// Loads the dataset at `path`, memoized for the process lifetime.
///
/// The cache is keyed by the path as given and never invalidated.
pub fn load(path: impl AsRef<Path>) -> DataLoadResult<SalesTable> {
    GLOBAL_CACHE.get_or_load(path.as_ref())
}

/// Loads the dataset at `path` without consulting or populating the cache.
pub fn load_uncached(path: impl AsRef<Path>) -> DataLoadResult<SalesTable> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let scope = ObservationScope::with_fields("DATASET_LOAD", &[("path", display.as_str())]);

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            let err = DataLoadError::file_missing(display.clone(), e);
            scope.fail_fatal(&err.to_string());
            observability::metrics().increment_load_failures();
            return Err(err);
        }
    };

    match read_table(file) {
        Ok(report) => {
            let rows = report.table.len().to_string();
            let dropped = report.rows_dropped.to_string();
            if report.rows_dropped > 0 {
                observability::log_event_with_fields(
                    Event::RowsDropped,
                    &[("path", display.as_str()), ("rows", dropped.as_str())],
                );
            }
            let metrics = observability::metrics();
            metrics.increment_datasets_loaded();
            metrics.add_rows_loaded(report.table.len() as u64);
            metrics.add_rows_dropped(report.rows_dropped as u64);
            scope.complete_with_fields(&[("rows", rows.as_str()), ("dropped", dropped.as_str())]);
            Ok(report.table)
        }
        Err(err) => {
            scope.fail_fatal(&err.to_string());
            observability::metrics().increment_load_failures();
            Err(err)
        }
    }
}

/// Parses CSV data from any reader.
pub fn read_table<R: Read>(reader: R) -> DataLoadResult<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataLoadError::malformed_csv(Some(1), format!("unreadable header: {}", e)))?
        .clone();

    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; lines are 1-based
        let fallback_line = idx + 2;
        rows_read += 1;

        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(fallback_line);
            DataLoadError::malformed_csv(Some(line), e.to_string())
        })?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match columns.parse_row(&row, line)? {
            Some(record) => records.push(record),
            None => rows_dropped += 1,
        }
    }

    Ok(LoadReport {
        table: SalesTable::new(records),
        rows_read,
        rows_dropped,
    })
}

/// Positions of the required columns within a header row
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> DataLoadResult<Self> {
        let by_name: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h, i))
            .collect();

        let mut positions = HashMap::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            let pos = by_name
                .get(column)
                .copied()
                .ok_or_else(|| DataLoadError::missing_column(column))?;
            positions.insert(column, pos);
        }

        Ok(Self { positions })
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| row.get(i))
            .unwrap_or("")
    }

    /// Returns `None` when the row has no year
    fn parse_row(&self, row: &StringRecord, line: usize) -> DataLoadResult<Option<SalesRecord>> {
        let year = match parse_year(self.cell(row, "Year"), line)? {
            Some(y) => y,
            None => return Ok(None),
        };

        Ok(Some(SalesRecord {
            name: self.cell(row, "Name").to_string(),
            platform: self.cell(row, "Platform").to_string(),
            year,
            genre: self.cell(row, "Genre").to_string(),
            publisher: self.cell(row, "Publisher").to_string(),
            na_sales: parse_sales(self.cell(row, "NA_Sales"), "NA_Sales", line)?,
            eu_sales: parse_sales(self.cell(row, "EU_Sales"), "EU_Sales", line)?,
            jp_sales: parse_sales(self.cell(row, "JP_Sales"), "JP_Sales", line)?,
            other_sales: parse_sales(self.cell(row, "Other_Sales"), "Other_Sales", line)?,
            global_sales: parse_sales(self.cell(row, "Global_Sales"), "Global_Sales", line)?,
        }))
    }
}

/// Parses a year cell; float spellings like `2006.0` truncate to the integer
fn parse_year(value: &str, line: usize) -> DataLoadResult<Option<i32>> {
    if MISSING_YEAR.contains(&value) {
        return Ok(None);
    }
    if let Ok(y) = value.parse::<i32>() {
        return Ok(Some(y));
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(Some(f.trunc() as i32))
        }
        _ => Err(DataLoadError::malformed_field(line, "Year", value)),
    }
}

fn parse_sales(value: &str, column: &'static str, line: usize) -> DataLoadResult<f64> {
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(f),
        _ => Err(DataLoadError::malformed_field(line, column, value)),
    }
}
