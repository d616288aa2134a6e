//! Workbook data model and reader for sheetdeck
//!
//! A [`Book`] is an ordered set of [`Sheet`]s. Each sheet carries its
//! columns (name plus inferred [`ColumnKind`]) and rows of typed
//! [`CellValue`]s, exactly as the spreadsheet reader classified them.
//!
//! # Examples
//!
//! ```
//! use sheetdeck_sheet::{CellValue, ColumnKind, Sheet};
//!
//! let sheet = Sheet::from_grid(
//!     "Sales",
//!     vec![
//!         vec![CellValue::from("Region"), CellValue::from("Amount")],
//!         vec![CellValue::from("North"), CellValue::Int(100)],
//!         vec![CellValue::Null, CellValue::Null],
//!     ],
//! );
//!
//! assert_eq!(sheet.column_names(), vec!["Region", "Amount"]);
//! assert_eq!(sheet.columns()[1].kind, ColumnKind::Numeric);
//! assert_eq!(sheet.row_count(), 2);
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use sheetdeck_sheet::Book;
//!
//! let book = Book::open("report.xlsx").unwrap();
//! for sheet in book.sheets() {
//!     println!("{}: {} rows", sheet.name(), sheet.row_count());
//! }
//! ```

mod book;
mod cell;
mod column;
mod error;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export column types.
pub use column::{Column, ColumnKind};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export workbook read options.
pub use xlsx::ReadOptions;
