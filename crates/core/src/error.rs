//! Error types for the curation pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Core pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] wordsieve_formats::Error),

    #[error(transparent)]
    Filter(#[from] wordsieve_filters::Error),

    #[error("Failed to open annotation store at {path:?}: {source}")]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },

    #[error("Annotation store error: {0}")]
    Store(#[from] sled::Error),

    #[error("Unreadable value in table `{table}` for key {key:?}: {reason}")]
    CorruptValue {
        table: &'static str,
        key: String,
        reason: String,
    },

    #[error("Inconsistent annotation store: {0}")]
    InconsistentStore(String),

    #[error(
        "Manual classification disagrees between word and lemma for {} word(s): {}",
        .0.len(),
        .0.join(", ")
    )]
    ConflictingManualClass(Vec<String>),

    #[error("Classifier unavailable at {path:?}: {reason}")]
    ClassifierUnavailable { path: PathBuf, reason: String },

    #[error("Training error: {0}")]
    Training(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
