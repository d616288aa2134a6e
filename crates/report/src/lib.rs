//! Workbook-to-HTML report pipeline
//!
//! Reader → Normalizer → Serializer → Emitter, one pass per sheet:
//!
//! 1. [`sheetdeck_sheet::Book::open`] reads every sheet with typed cells.
//! 2. [`normalize_sheet`] turns cells into display strings (`DD-MM-YYYY`
//!    dates, empty strings for missing values) and drops empty rows.
//! 3. The sheets are serialized either as inline table markup
//!    ([`markup`]) or as records plus a column schema ([`records`]).
//! 4. [`build_report`] fills the document skeleton and [`Report::write`]
//!    writes the HTML (and the companion `<title>_data.js`) all-or-nothing.
//!
//! # Examples
//!
//! ```no_run
//! use sheetdeck_report::{convert, ReportFormat, ReportOptions, SystemClock};
//! use std::path::Path;
//!
//! let options = ReportOptions::default().with_format(ReportFormat::Records);
//! let report = convert(
//!     Path::new("sales.xlsx"),
//!     Path::new("out/Sales Report.html"),
//!     &options,
//!     &SystemClock,
//! )
//! .unwrap();
//! assert_eq!(report.title, "Sales Report");
//! ```

mod clock;
mod emit;
mod error;
pub mod markup;
mod normalize;
mod options;
pub mod records;
mod template;

pub use clock::{Clock, FixedClock, SystemClock};
pub use emit::{
    build_report, companion_file_name, companion_src, report_title, Report, ReportFile,
};
pub use error::{ReportError, Result};
pub use normalize::{normalize_book, normalize_cell, normalize_sheet, NormalizedSheet, DATE_FORMAT};
pub use options::{ReportFormat, ReportOptions, DEFAULT_THEME, DEFAULT_TIMESTAMP_FORMAT};
pub use template::{Template, MARKUP, RECORDS};

use sheetdeck_sheet::Book;
use std::path::Path;
use tracing::{info, info_span};

/// Read and normalize every sheet of a workbook
pub fn load(input: &Path, options: &ReportOptions) -> Result<Vec<NormalizedSheet>> {
    let book = Book::open_with_options(input, &options.read)?;
    info!(
        input = %input.display(),
        sheets = book.sheet_count(),
        "opened workbook"
    );
    Ok(normalize_book(&book))
}

/// Run the whole pipeline and write the report.
///
/// Nothing is written unless every step succeeds.
pub fn convert(
    input: &Path,
    output: &Path,
    options: &ReportOptions,
    clock: &dyn Clock,
) -> Result<Report> {
    let _span = info_span!("convert", input = %input.display(), output = %output.display())
        .entered();

    options.validate()?;
    let sheets = load(input, options)?;
    let report = build_report(&sheets, output, options, clock)?;
    report.write()?;
    info!(files = report.files.len(), "report written");
    Ok(report)
}
