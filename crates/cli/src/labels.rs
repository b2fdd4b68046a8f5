//! Labeled `word,value` files for annotation import and training

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Read `word,label` rows; labels are 1/0, true/false or yes/no
pub fn read_flags(path: &Path) -> Result<Vec<(String, bool)>> {
    read_pairs(path)?
        .into_iter()
        .map(|(line, word, value)| {
            let flag = parse_flag(&value)
                .with_context(|| format!("{}:{}: bad label for {:?}", path.display(), line, word))?;
            Ok((word, flag))
        })
        .collect()
}

/// Read `word,lemma` rows
pub fn read_lemmas(path: &Path) -> Result<Vec<(String, String)>> {
    Ok(read_pairs(path)?
        .into_iter()
        .map(|(_, word, lemma)| (word, lemma))
        .collect())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => bail!("expected 1/0, true/false or yes/no, found {:?}", other),
    }
}

/// Two-column rows with their line numbers; an optional `word,...` header
/// and blank lines are skipped
fn read_pairs(path: &Path) -> Result<Vec<(usize, String, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labeled file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if idx == 0 && line.starts_with("word,") {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(value), None) if !word.is_empty() && !value.is_empty() => {
                rows.push((idx + 1, word.to_string(), value.to_string()))
            }
            _ => bail!(
                "{}:{}: expected two non-empty columns, found {:?}",
                path.display(),
                idx + 1,
                line
            ),
        }
    }
    Ok(rows)
}
