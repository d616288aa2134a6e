//! Report emission: fills the document skeleton and writes the output files
//!
//! Files are written all-or-nothing. Every file is first written to a
//! temporary file in the destination directory; only when all of them were
//! written are they moved into place.

use crate::clock::Clock;
use crate::error::{ReportError, Result};
use crate::markup::{escape_html, render_sheet_tables, render_tab_buttons};
use crate::normalize::NormalizedSheet;
use crate::options::{ReportFormat, ReportOptions};
use crate::records::{companion_script, inline_json, report_data, report_schema};
use crate::template::{MARKUP, RECORDS};
use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const FALLBACK_TITLE: &str = "report";

/// Bytes that cannot appear literally in a relative URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Derive the report title from the output path: its base name without
/// the extension
#[must_use]
pub fn report_title(output: &Path) -> String {
    output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// File name of the companion data script for a report title
#[must_use]
pub fn companion_file_name(title: &str) -> String {
    format!("{title}_data.js")
}

/// Relative URL under which the report page loads its companion file
#[must_use]
pub fn companion_src(title: &str) -> String {
    utf8_percent_encode(&companion_file_name(title), PATH_SEGMENT).to_string()
}

/// One file of a report, fully rendered in memory
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub path: PathBuf,
    pub contents: String,
}

/// A rendered report, ready to be written
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub generated_at: NaiveDateTime,
    /// Generation time as embedded in the document
    pub timestamp: String,
    pub files: Vec<ReportFile>,
}

impl Report {
    /// Paths of every file of the report, HTML first
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }

    /// Write every file, or none of them.
    ///
    /// # Errors
    ///
    /// Returns a write error naming the first file that could not be
    /// written. Files already moved into place by this call are removed.
    pub fn write(&self) -> Result<()> {
        let mut staged: Vec<(NamedTempFile, &Path)> = Vec::with_capacity(self.files.len());
        for file in &self.files {
            staged.push((stage(file)?, file.path.as_path()));
        }

        // the HTML comes first in `files`; persist it last so a page never
        // points at a data file that is not there yet
        let mut persisted: Vec<&Path> = Vec::with_capacity(staged.len());
        for (temp, path) in staged.into_iter().rev() {
            if let Err(err) = temp.persist(path) {
                for done in &persisted {
                    let _ = fs::remove_file(done);
                }
                return Err(write_error(path, err.error));
            }
            debug!(path = %path.display(), "wrote report file");
            persisted.push(path);
        }

        Ok(())
    }
}

fn stage(file: &ReportFile) -> Result<NamedTempFile> {
    let dir = match file.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(&file.path, e))?;
    temp.write_all(file.contents.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|e| write_error(&file.path, e))?;
    Ok(temp)
}

fn write_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Write {
        path: path.display().to_string(),
        source,
    }
}

/// Render the report for already normalized sheets.
///
/// Pure apart from reading the clock; nothing is written.
pub fn build_report(
    sheets: &[NormalizedSheet],
    output: &Path,
    options: &ReportOptions,
    clock: &dyn Clock,
) -> Result<Report> {
    options.validate()?;

    let title = report_title(output);
    let generated_at = clock.now();
    let mut timestamp = String::new();
    // offset specifiers such as %z cannot be rendered for a naive time
    write!(timestamp, "{}", generated_at.format(&options.timestamp_format))
        .map_err(|_| ReportError::InvalidTimestampFormat(options.timestamp_format.clone()))?;

    let title_html = escape_html(&title).into_owned();
    let title_js = inline_json(&title)?;
    let timestamp_html = escape_html(&timestamp).into_owned();
    let timestamp_js = inline_json(&timestamp)?;
    let tabs = render_tab_buttons(sheets, options.escape_cells);
    let common: [(&str, &str); 6] = [
        ("title", title_html.as_str()),
        ("title_js", title_js.as_str()),
        ("theme", options.theme.as_str()),
        ("timestamp", timestamp_html.as_str()),
        ("timestamp_js", timestamp_js.as_str()),
        ("tabs", tabs.as_str()),
    ];

    let files = match options.format {
        ReportFormat::Markup => {
            let tables = render_sheet_tables(sheets, options.escape_cells);
            let mut values = common.to_vec();
            values.push(("sheets", tables.as_str()));
            let html = MARKUP.render(&values)?;
            vec![ReportFile {
                path: output.to_path_buf(),
                contents: html,
            }]
        }
        ReportFormat::Records => {
            let data_name = companion_file_name(&title);
            let data_path = output.with_file_name(&data_name);
            let data_src = companion_src(&title);
            let data_attr = escape_html(&data_src);
            let schema = inline_json(&report_schema(sheets))?;
            let mut values = common.to_vec();
            values.extend([
                ("data_file", &*data_attr),
                ("schema", schema.as_str()),
                ("escape_cells", if options.escape_cells { "true" } else { "false" }),
            ]);
            let html = RECORDS.render(&values)?;
            let script = companion_script(&report_data(sheets))?;
            vec![
                ReportFile {
                    path: output.to_path_buf(),
                    contents: html,
                },
                ReportFile {
                    path: data_path,
                    contents: script,
                },
            ]
        }
    };

    info!(
        title = %title,
        sheets = sheets.len(),
        files = files.len(),
        "built report"
    );

    Ok(Report {
        title,
        generated_at,
        timestamp,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use sheetdeck_sheet::{Column, ColumnKind};

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
        )
    }

    fn sheets() -> Vec<NormalizedSheet> {
        vec![NormalizedSheet {
            name: "Sales".to_string(),
            columns: vec![
                Column::new("Date", ColumnKind::Date),
                Column::new("Amount", ColumnKind::Numeric),
            ],
            rows: vec![
                vec!["05-01-2024".into(), "100".into()],
                vec!["10-02-2024".into(), "250".into()],
            ],
        }]
    }

    #[test]
    fn test_report_title() {
        assert_eq!(report_title(Path::new("out/Quarterly Report.html")), "Quarterly Report");
        assert_eq!(report_title(Path::new("/a/b/c/d/Quarterly Report.HTML")), "Quarterly Report");
        assert_eq!(report_title(Path::new("Quarterly Report.html")), "Quarterly Report");
        assert_eq!(report_title(Path::new("archive.tar.html")), "archive.tar");
        assert_eq!(report_title(Path::new("noext")), "noext");
        assert_eq!(report_title(Path::new("/")), "report");
    }

    #[test]
    fn test_companion_file_name() {
        assert_eq!(companion_file_name("Quarterly Report"), "Quarterly Report_data.js");
    }

    #[test]
    fn test_companion_src_is_url_encoded() {
        assert_eq!(companion_src("Q1"), "Q1_data.js");
        assert_eq!(companion_src("Report #1"), "Report%20%231_data.js");
        assert_eq!(companion_src("50% done?"), "50%25%20done%3F_data.js");
        assert_eq!(companion_src("Übersicht"), "%C3%9Cbersicht_data.js");
    }

    #[test]
    fn test_records_link_survives_special_title() {
        let options = ReportOptions::default().with_format(ReportFormat::Records);
        let report =
            build_report(&sheets(), Path::new("out/Report #1&2.html"), &options, &clock()).unwrap();

        assert_eq!(report.files[1].path, Path::new("out/Report #1&2_data.js"));
        let html = &report.files[0].contents;
        assert!(html.contains(r#"<script src="Report%20%231&amp;2_data.js"></script>"#));
    }

    #[test]
    fn test_failed_persist_removes_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        let data = dir.path().join("page_data.js");
        // a directory in the page's place makes the last move fail
        fs::create_dir(&page).unwrap();

        let report = Report {
            title: "page".to_string(),
            generated_at: clock().0,
            timestamp: String::new(),
            files: vec![
                ReportFile {
                    path: page.clone(),
                    contents: "<html></html>".to_string(),
                },
                ReportFile {
                    path: data.clone(),
                    contents: "const reportData = {};\n".to_string(),
                },
            ],
        };

        let err = report.write().unwrap_err();
        assert!(matches!(err, ReportError::Write { ref path, .. } if path.ends_with("page.html")));
        assert!(!data.exists());
        assert!(page.is_dir());
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_markup_report_is_single_file() {
        let options = ReportOptions::default();
        let report = build_report(&sheets(), Path::new("out/Sales.html"), &options, &clock()).unwrap();

        assert_eq!(report.title, "Sales");
        assert_eq!(report.timestamp, "01-03-2024 14:05:09");
        assert_eq!(report.paths(), vec![Path::new("out/Sales.html")]);

        let html = &report.files[0].contents;
        assert!(html.contains("<title>Sales</title>"));
        assert!(html.contains("Last Updated: 01-03-2024 14:05:09"));
        assert!(html.contains("const REPORT_TITLE = \"Sales\";"));
        assert!(html.contains("--theme: #880055;"));
        assert!(html.contains("<td>05-01-2024</td><td>100</td>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_records_report_has_companion() {
        let options = ReportOptions::default().with_format(ReportFormat::Records);
        let report = build_report(&sheets(), Path::new("out/Q1.html"), &options, &clock()).unwrap();

        assert_eq!(
            report.paths(),
            vec![Path::new("out/Q1.html"), Path::new("out/Q1_data.js")]
        );
        let html = &report.files[0].contents;
        assert!(html.contains(r#"<script src="Q1_data.js"></script>"#));
        assert!(html.contains(r#"const reportSheets = [{"name":"Sales","columns":[{"title":"Date","data":"Date"}"#));
        assert!(html.contains("const ESCAPE_CELLS = true;"));
        assert!(!html.contains("{{"));
        assert!(report.files[1].contents.starts_with("const reportData = "));
    }

    #[test]
    fn test_custom_timestamp_and_theme() {
        let options = ReportOptions::default()
            .with_theme("#0055aa")
            .with_timestamp_format("%d-%m-%Y %H:%M");
        let report = build_report(&sheets(), Path::new("r.html"), &options, &clock()).unwrap();
        assert_eq!(report.timestamp, "01-03-2024 14:05");
        assert!(report.files[0].contents.contains("--theme: #0055aa;"));
    }

    #[test]
    fn test_invalid_theme_rejected() {
        let options = ReportOptions::default().with_theme("red;}</style>");
        let result = build_report(&sheets(), Path::new("r.html"), &options, &clock());
        assert!(matches!(result, Err(ReportError::InvalidTheme(_))));
    }

    #[test]
    fn test_title_is_escaped() {
        let report = build_report(
            &sheets(),
            Path::new("<b>&co.html"),
            &ReportOptions::default(),
            &clock(),
        )
        .unwrap();
        let html = &report.files[0].contents;
        assert!(html.contains("<title>&lt;b&gt;&amp;co</title>"));
        assert!(html.contains(r#"const REPORT_TITLE = "<b>&co";"#));
    }
}
