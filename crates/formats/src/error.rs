//! Error types for word list formats

use std::path::PathBuf;

use thiserror::Error;

/// Format errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed word list at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    #[error("Failed to persist {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn data_format(line: usize, reason: impl Into<String>) -> Self {
        Error::DataFormat {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
