//! Heuristic filters for vocabulary curation
//!
//! This crate provides the cheap, rule-based predicates that thin a
//! candidate word list before any stored annotation or model is consulted.

pub mod error;
pub mod heuristics;
pub mod stopwords;

pub use error::{Error, Result};
pub use heuristics::{Candidate, HeuristicChain, HeuristicConfig, StageReport};
pub use stopwords::StopWordList;
