//! Core curation logic for vocabulary filtering
//!
//! This crate holds the candidate model, the lemmatizer, the persistent
//! annotation store, the word classifier and the pipeline that sequences
//! them.

pub mod error;
pub mod candidate;
pub mod lemmatizer;
pub mod store;
pub mod classifier;
pub mod pipeline;

pub use error::{Error, Result};
pub use candidate::CandidateWord;
pub use classifier::{NgramClassifier, TrainParams, WordClassifier};
pub use lemmatizer::{Lemmatize, RuleLemmatizer};
pub use pipeline::{
    Persisted, Pipeline, PipelineConfig, PipelineDeps, PipelineOutcome, ReviewBatch, RunSummary,
};
pub use store::{AnnotationSnapshot, AnnotationStore, ImportReport, Table, TableCounts};
