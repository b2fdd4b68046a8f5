//! `word,lemma,frequency` output table

use crate::{Error, OutputRow, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub const OUTPUT_HEADER: &str = "word,lemma,frequency";

/// Write rows in the order given, header first
pub fn write_rows<W: Write>(writer: W, rows: &[OutputRow]) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", OUTPUT_HEADER)?;
    for row in rows {
        writeln!(writer, "{},{},{}", row.word, row.lemma, row.frequency)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the output table atomically: rows go to a temporary file in the
/// destination directory which is renamed over `path` once complete.
pub fn write_output_table<P: AsRef<Path>>(path: P, rows: &[OutputRow]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    write_rows(temp.as_file_mut(), rows)?;
    temp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}
