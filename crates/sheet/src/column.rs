use crate::cell::CellValue;
use serde::{Deserialize, Serialize};

/// Value kind of a column, as derived from the reader's cell classification.
///
/// This enumeration is the whole contract between the reader and the
/// normalizer: any reader able to report per-column kinds can feed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Numeric,
    Date,
    #[default]
    Empty,
}

impl ColumnKind {
    /// Infer the kind of a column from its cells.
    ///
    /// Missing cells never influence the result. A column is `Date` only
    /// when every present cell is a date; a single text cell demotes the
    /// whole column to `Text`.
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut kind = ColumnKind::Empty;
        for cell in cells {
            let cell_kind = match cell {
                CellValue::Null => continue,
                CellValue::Date(_) => ColumnKind::Date,
                CellValue::Int(_) | CellValue::Float(_) => ColumnKind::Numeric,
                _ => return ColumnKind::Text,
            };
            kind = match kind {
                ColumnKind::Empty => cell_kind,
                current if current == cell_kind => current,
                _ => return ColumnKind::Text,
            };
        }
        kind
    }
}

/// A named column. The name is both the display header and the record key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Column {
            name: name.into(),
            kind,
        }
    }
}
