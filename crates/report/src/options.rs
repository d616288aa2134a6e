use crate::error::{ReportError, Result};
use chrono::format::{Item, StrftimeItems};
use sheetdeck_sheet::ReadOptions;

/// Default theme color used for headers, tabs and buttons
pub const DEFAULT_THEME: &str = "#880055";

/// Default format of the "last generated" marker
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Which output representation to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// A single HTML file with every sheet's table markup inline
    #[default]
    Markup,
    /// An HTML shell plus a companion `<title>_data.js` record file
    Records,
}

/// Options for building a report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub theme: String,
    /// HTML-escape cell text, headers and sheet names
    pub escape_cells: bool,
    pub timestamp_format: String,
    pub read: ReadOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            format: ReportFormat::default(),
            theme: DEFAULT_THEME.to_string(),
            escape_cells: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            read: ReadOptions::default(),
        }
    }
}

impl ReportOptions {
    /// Set the output representation
    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the theme color (`#rgb` or `#rrggbb`)
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set whether cell content is HTML-escaped
    #[must_use]
    pub fn with_escape_cells(mut self, escape: bool) -> Self {
        self.escape_cells = escape;
        self
    }

    /// Set the chrono format string of the generation timestamp
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Set the workbook read options
    #[must_use]
    pub fn with_read_options(mut self, read: ReadOptions) -> Self {
        self.read = read;
        self
    }

    /// Check the options that end up inside generated CSS and scripts
    pub fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.theme) {
            return Err(ReportError::InvalidTheme(self.theme.clone()));
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::InvalidTimestampFormat(
                self.timestamp_format.clone(),
            ));
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}
