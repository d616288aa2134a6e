use crate::cell::CellValue;
use crate::column::{Column, ColumnKind};
use std::collections::HashSet;

/// A named sheet: ordered columns and ordered rows aligned with them.
///
/// Rows are always padded to the column count, so every row has exactly
/// one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a sheet from header names and data rows.
    ///
    /// Short rows are padded with `Null`. Cells beyond the header width get
    /// generated `Unnamed: {index}` columns. Column kinds are inferred from
    /// the data.
    #[must_use]
    pub fn new(name: &str, column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<CellValue> = column_names.into_iter().map(CellValue::String).collect();
        let names = resolve_headers(&headers, grid_width(&headers, &rows));
        Sheet::with_resolved_names(name, names, rows)
    }

    /// Create a sheet from a raw grid whose first row holds the headers
    #[must_use]
    pub fn from_grid(name: &str, grid: Vec<Vec<CellValue>>) -> Self {
        let mut grid = grid.into_iter();
        let Some(header) = grid.next() else {
            return Sheet::empty(name);
        };
        let rows: Vec<Vec<CellValue>> = grid.collect();
        let names = resolve_headers(&header, grid_width(&header, &rows));
        Sheet::with_resolved_names(name, names, rows)
    }

    /// `names` must already be unique and at least as wide as every row
    fn with_resolved_names(name: &str, names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = names.len();
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, ColumnKind::infer(rows.iter().map(|row| &row[i]))))
            .collect();

        Sheet {
            name: name.to_string(),
            columns,
            rows,
        }
    }

    /// Create a sheet with no columns and no rows
    #[must_use]
    pub fn empty(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the columns in order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get the column names in order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the rows in order
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Get the number of data rows (the header is not counted)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the sheet has neither columns nor rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

fn grid_width(header: &[CellValue], rows: &[Vec<CellValue>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0).max(header.len())
}

/// Turn a header row into unique column names.
///
/// Blank headers become `Unnamed: {index}`; repeated headers get a `.{n}`
/// suffix, counting from 1 and skipping names already taken.
fn resolve_headers(header: &[CellValue], width: usize) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(width);
    let mut names = Vec::with_capacity(width);

    for i in 0..width {
        let raw = header.get(i).map(ToString::to_string).unwrap_or_default();
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            raw
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while taken.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}
