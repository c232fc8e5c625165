//! Error types for mdltoobj

use thiserror::Error;

/// Main error type for mdltoobj operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("No usable geometry found in {path}")]
    NoGeometry { path: String },

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}
