//! Review batch files
//!
//! Words the pipeline cannot classify are written one per line into
//! sequentially numbered files of at most [`REVIEW_CHUNK_SIZE`] lines, so
//! each file can be labeled in one sitting.

use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const REVIEW_CHUNK_SIZE: usize = 49_000;
pub const REVIEW_FILE_PREFIX: &str = "check_exclusion";

/// Path of the `index`-th review file in `dir`
pub fn review_file_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{}_{}.csv", REVIEW_FILE_PREFIX, index))
}

/// Write `words` in chunks of `chunk_size`, returning the files written
pub fn write_review_batch<S: AsRef<str>>(
    dir: &Path,
    words: &[S],
    chunk_size: usize,
) -> Result<Vec<PathBuf>> {
    let chunk_size = chunk_size.max(1);
    fs::create_dir_all(dir)?;

    let mut paths = Vec::new();
    for (index, chunk) in words.chunks(chunk_size).enumerate() {
        let path = review_file_path(dir, index);
        let mut writer = BufWriter::new(File::create(&path)?);
        for (i, word) in chunk.iter().enumerate() {
            if i > 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(word.as_ref().as_bytes())?;
        }
        writer.flush()?;
        paths.push(path);
    }

    info!(
        "Wrote {} words for review into {} file(s) under {:?}",
        words.len(),
        paths.len(),
        dir
    );
    Ok(paths)
}
