//! Streaming `word,frequency` reader
//!
//! Reads the candidate list produced by the frequency counter line by line,
//! with transparent gzip decompression for `.gz` files. Unlike a best-effort
//! reader, any malformed row is an error: a run must never work from a
//! partially ingested list.

use crate::{Error, Result, WordFrequency};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const WORD_LIST_HEADER: [&str; 2] = ["word", "frequency"];

const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming word list reader
pub struct WordListReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
    header_seen: bool,
}

impl WordListReader<Box<dyn Read>> {
    /// Open a word list, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => {
                debug!("Opening gzip-compressed word list: {:?}", path);
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
                Ok(Self::with_total(reader, None))
            }
            _ => {
                debug!("Opening plain word list: {:?}", path);
                let reader: Box<dyn Read> = Box::new(file);
                Ok(Self::with_total(reader, Some(total_bytes)))
            }
        }
    }
}

impl<R: Read> WordListReader<R> {
    /// Create a reader over any Read source
    pub fn new(reader: R) -> Self {
        Self::with_total(reader, None)
    }

    fn with_total(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            reader: BufReader::with_capacity(BUFFER_SIZE, reader),
            line_number: 0,
            bytes_read: 0,
            total_bytes,
            header_seen: false,
        }
    }

    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn check_header(&self, line: &str) -> Result<()> {
        let columns: Vec<&str> = line.split(',').map(str::trim).collect();
        if columns != WORD_LIST_HEADER {
            return Err(Error::data_format(
                self.line_number,
                format!("expected header `word,frequency`, found `{}`", line),
            ));
        }
        Ok(())
    }

    fn parse_row(&self, line: &str) -> Result<WordFrequency> {
        let mut fields = line.split(',');
        let (word, freq) = match (fields.next(), fields.next(), fields.next()) {
            (Some(w), Some(f), None) => (w.trim(), f.trim()),
            _ => {
                return Err(Error::data_format(
                    self.line_number,
                    format!("expected 2 columns in `{}`", line),
                ))
            }
        };

        if word.is_empty() {
            return Err(Error::data_format(self.line_number, "empty word"));
        }
        let frequency = freq.parse::<u64>().map_err(|e| {
            Error::data_format(
                self.line_number,
                format!("frequency `{}` is not a non-negative integer: {}", freq, e),
            )
        })?;

        Ok(WordFrequency::new(word, frequency, self.line_number))
    }
}

impl<R: Read> Iterator for WordListReader<R> {
    type Item = Result<WordFrequency>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    if !self.header_seen {
                        self.header_seen = true;
                        return Some(Err(Error::data_format(
                            self.line_number,
                            "missing `word,frequency` header",
                        )));
                    }
                    return None;
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;

                    let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
                    if trimmed.trim().is_empty() {
                        continue;
                    }

                    if !self.header_seen {
                        self.header_seen = true;
                        if let Err(e) = self.check_header(trimmed) {
                            return Some(Err(e));
                        }
                        continue;
                    }

                    return Some(self.parse_row(trimmed));
                }
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }
    }
}

/// Read a whole word list, failing on the first malformed row
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<WordFrequency>> {
    let path = path.as_ref();
    let words = WordListReader::open(path)?.collect::<Result<Vec<_>>>()?;
    info!("Loaded {} candidate words from {:?}", words.len(), path);
    Ok(words)
}
