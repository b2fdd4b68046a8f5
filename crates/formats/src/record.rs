//! Row types shared by the readers and writers

/// One row of the input word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: u64,
    /// 1-based line number in the source file
    pub source_line: usize,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, frequency: u64, source_line: usize) -> Self {
        Self {
            word: word.into(),
            frequency,
            source_line,
        }
    }
}

/// One row of the final output table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub word: String,
    pub lemma: String,
    pub frequency: u64,
}
