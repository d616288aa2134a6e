//! Record/schema serialization for the client-side data table
//!
//! A sheet is described by a column schema (`{title, data}` pairs, both the
//! column name) and a list of records mapping every column name to its
//! normalized value. Records of all sheets are gathered into one
//! [`ReportData`] map and written as a companion script.

use crate::error::Result;
use crate::normalize::NormalizedSheet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Global the companion script assigns the record data to
pub const DATA_VARIABLE: &str = "reportData";

/// One column descriptor as consumed by the data table widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub title: String,
    pub data: String,
}

/// Schema of one sheet, kept in a list so sheet order survives in the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

/// One row: column name -> normalized value, in column order
pub type Record = IndexMap<String, String>;

/// Sheet name -> that sheet's records, in sheet order
pub type ReportData = IndexMap<String, Vec<Record>>;

#[must_use]
pub fn column_schema(sheet: &NormalizedSheet) -> Vec<ColumnSpec> {
    sheet
        .columns
        .iter()
        .map(|c| ColumnSpec {
            title: c.name.clone(),
            data: c.name.clone(),
        })
        .collect()
}

/// Build the records of one sheet; every record carries every column
#[must_use]
pub fn records(sheet: &NormalizedSheet) -> Vec<Record> {
    sheet
        .rows
        .iter()
        .map(|row| {
            sheet
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| (column.name.clone(), value.clone()))
                .collect()
        })
        .collect()
}

#[must_use]
pub fn report_data(sheets: &[NormalizedSheet]) -> ReportData {
    sheets
        .iter()
        .map(|sheet| (sheet.name.clone(), records(sheet)))
        .collect()
}

#[must_use]
pub fn report_schema(sheets: &[NormalizedSheet]) -> Vec<SheetSchema> {
    sheets
        .iter()
        .map(|sheet| SheetSchema {
            name: sheet.name.clone(),
            columns: column_schema(sheet),
        })
        .collect()
}

/// Contents of the companion data file: a script assignment, so the HTML
/// shell can load it with a plain `<script src>` from a local path
pub fn companion_script(data: &ReportData) -> Result<String> {
    let json = serde_json::to_string(data)?;
    Ok(format!("const {DATA_VARIABLE} = {json};\n"))
}

/// Serialize a value as JSON that can sit inside an inline `<script>` element
pub fn inline_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetdeck_sheet::{Column, ColumnKind};

    fn sales() -> NormalizedSheet {
        NormalizedSheet {
            name: "Sales".to_string(),
            columns: vec![
                Column::new("Date", ColumnKind::Date),
                Column::new("Amount", ColumnKind::Numeric),
                Column::new("Note", ColumnKind::Text),
            ],
            rows: vec![
                vec!["05-01-2024".into(), "100".into(), String::new()],
                vec!["10-02-2024".into(), "250".into(), "late".into()],
            ],
        }
    }

    #[test]
    fn test_column_schema_title_equals_key() {
        let schema = column_schema(&sales());
        assert_eq!(schema.len(), 3);
        assert!(schema.iter().all(|c| c.title == c.data));
        assert_eq!(schema[2].title, "Note");
    }

    #[test]
    fn test_every_record_has_every_key_in_order() {
        let sheet = sales();
        let recs = records(&sheet);
        assert_eq!(recs.len(), sheet.row_count());
        for rec in &recs {
            let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
            assert_eq!(keys, sheet.column_names());
        }
        assert_eq!(recs[0]["Note"], "");
    }

    #[test]
    fn test_companion_script_shape() {
        let data = report_data(&[sales()]);
        let script = companion_script(&data).unwrap();
        assert!(script.starts_with("const reportData = {\"Sales\":[{\"Date\":\"05-01-2024\""));
        assert!(script.ends_with("};\n"));
    }

    #[test]
    fn test_inline_json_breaks_script_close() {
        let json = inline_json(&vec!["</script><script>alert(1)"]).unwrap();
        assert!(!json.contains("</script>"));
        assert_eq!(json, r#"["<\/script><script>alert(1)"]"#);
    }

    #[test]
    fn test_schema_keeps_sheet_order() {
        let mut second = sales();
        second.name = "2024".to_string();
        let schema = report_schema(&[sales(), second]);
        let names: Vec<&str> = schema.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "2024"]);
    }
}
