use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a workbook
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Input file '{}' not found.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
