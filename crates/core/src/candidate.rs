//! Candidate word model

use wordsieve_filters::Candidate;
use wordsieve_formats::{OutputRow, WordFrequency};

use crate::lemmatizer::Lemmatize;

/// A word under consideration, with its lemma computed once at load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord {
    pub surface: String,
    pub frequency: u64,
    /// Automatic lemma, used for every store and classifier lookup
    pub lemma: String,
    /// Human correction, used for grouping, sorting and output
    pub manual_lemma: Option<String>,
    /// Set when a human marked the word or its lemma as target language
    pub keep: bool,
    /// Position in the input list; stable secondary sort key
    pub position: usize,
}

impl CandidateWord {
    pub fn new(surface: impl Into<String>, frequency: u64, position: usize, lemmatizer: &dyn Lemmatize) -> Self {
        let surface = surface.into();
        let lemma = lemmatizer.lemmatize(&surface);
        Self {
            surface,
            frequency,
            lemma,
            manual_lemma: None,
            keep: false,
            position,
        }
    }

    pub fn from_row(row: WordFrequency, position: usize, lemmatizer: &dyn Lemmatize) -> Self {
        Self::new(row.word, row.frequency, position, lemmatizer)
    }

    /// The lemma written to the output
    pub fn canonical_lemma(&self) -> &str {
        self.manual_lemma.as_deref().unwrap_or(&self.lemma)
    }

    pub fn to_output(&self) -> OutputRow {
        OutputRow {
            word: self.surface.clone(),
            lemma: self.canonical_lemma().to_string(),
            frequency: self.frequency,
        }
    }
}

impl Candidate for CandidateWord {
    fn surface(&self) -> &str {
        &self.surface
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }
}
