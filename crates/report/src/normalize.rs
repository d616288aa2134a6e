//! Conversion of typed sheets into display-stable strings
//!
//! After normalization:
//! - every cell of a `Date` column reads `DD-MM-YYYY`,
//! - every missing cell is the empty string,
//! - rows that were missing in every column are gone.

use sheetdeck_sheet::{Book, CellValue, Column, ColumnKind, Sheet};
use tracing::debug;

/// chrono format applied to cells of date-typed columns
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A sheet whose cells are already in their output string form
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl NormalizedSheet {
    /// Get the column names in order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }
}

/// Normalize one sheet
#[must_use]
pub fn normalize_sheet(sheet: &Sheet) -> NormalizedSheet {
    let columns = sheet.columns().to_vec();
    let mut dropped = 0usize;

    let rows: Vec<Vec<String>> = sheet
        .rows()
        .iter()
        .filter(|row| {
            // checked on the source values, before missing becomes ""
            let keep = !row.iter().all(CellValue::is_null);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|row| {
            row.iter()
                .zip(&columns)
                .map(|(cell, column)| normalize_cell(cell, column.kind))
                .collect()
        })
        .collect();

    debug!(
        sheet = sheet.name(),
        rows = rows.len(),
        dropped,
        "normalized sheet"
    );

    NormalizedSheet {
        name: sheet.name().to_string(),
        columns,
        rows,
    }
}

/// Normalize every sheet of a book, in source order
#[must_use]
pub fn normalize_book(book: &Book) -> Vec<NormalizedSheet> {
    book.sheets().map(normalize_sheet).collect()
}

/// Render one cell as its output string
#[must_use]
pub fn normalize_cell(cell: &CellValue, kind: ColumnKind) -> String {
    match (kind, cell) {
        (_, CellValue::Null) => String::new(),
        (ColumnKind::Date, CellValue::Date(dt)) => dt.format(DATE_FORMAT).to_string(),
        (_, other) => other.to_string(),
    }
}
