//! File formats for vocabulary curation
//!
//! Streaming reader for `word,frequency` lists (optionally gzip-compressed),
//! the `word,lemma,frequency` output table, and the chunked review files
//! handed to annotators.

pub mod error;
pub mod record;
pub mod review;
pub mod table;
pub mod word_list;

pub use error::{Error, Result};
pub use record::{OutputRow, WordFrequency};
pub use review::{write_review_batch, REVIEW_CHUNK_SIZE};
pub use table::write_output_table;
pub use word_list::{read_word_list, WordListReader};
