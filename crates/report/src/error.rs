use thiserror::Error;

/// Errors that can occur while building or writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Sheet(#[from] sheetdeck_sheet::SheetError),

    #[error("Invalid theme color '{0}': expected #rgb or #rrggbb")]
    InvalidTheme(String),

    #[error("Invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),

    #[error("Template '{template}': {message}")]
    Template { template: String, message: String },

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
