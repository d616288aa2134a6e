use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::debug;

/// Options for reading workbooks
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Leave out sheets that have neither a header nor data
    pub skip_empty_sheets: bool,
}

impl ReadOptions {
    /// Set whether empty sheets are left out of the book
    #[must_use]
    pub fn with_skip_empty_sheets(mut self, skip: bool) -> Self {
        self.skip_empty_sheets = skip;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => excel_datetime_to_cell_value(dt),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::Duration(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

fn excel_datetime_to_cell_value(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return CellValue::Duration(format_duration_days(dt.as_f64()));
    }
    // a serial below one day carries no date, only a time of day
    let is_time_only = (0.0..1.0).contains(&dt.as_f64());
    // calamine resolves the 1900/1904 date system when converting
    match dt.as_datetime() {
        Some(value) if is_time_only => CellValue::Time(value.time()),
        Some(value) => CellValue::Date(value),
        None => CellValue::Float(dt.as_f64()),
    }
}

/// Format a duration given in days as `H:MM:SS`
fn format_duration_days(days: f64) -> String {
    let total = (days * 86_400.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Convert a calamine range into rows that start at column A.
///
/// The range begins at the first used cell, so empty leading columns are
/// restored as missing cells.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    range
        .rows()
        .map(|row| {
            let mut cells = vec![CellValue::Null; leading];
            cells.extend(row.iter().map(data_to_cell_value));
            cells
        })
        .collect()
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl Book {
    /// Load every sheet of a workbook (xlsx, xlsm, xlsb, xls or ods)
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, or a read error if the
    /// file cannot be parsed as a workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &ReadOptions::default())
    }

    /// Load a workbook with options
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, or a read error if the
    /// file cannot be parsed as a workbook.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SheetError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|e| SheetError::Workbook(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| SheetError::SheetRead {
                    sheet: sheet_name.clone(),
                    message: e.to_string(),
                })?;

            let grid = range_to_grid(&range);

            let sheet = Sheet::from_grid(&sheet_name, grid);
            debug!(
                sheet = %sheet_name,
                rows = sheet.row_count(),
                columns = sheet.col_count(),
                "read sheet"
            );

            if options.skip_empty_sheets && sheet.is_empty() {
                debug!(sheet = %sheet_name, "skipping empty sheet");
                continue;
            }

            book.add_sheet(sheet)?;
        }

        Ok(book)
    }
}
