//! Persistent annotation store
//!
//! Three durable tables of earlier decisions, each keyed by surface word:
//!
//! - `exclusion`: word found in the reference list of confusable vocabulary
//! - `manual_class`: human verdict on whether the word is target language
//! - `manual_lemma`: human correction of the automatic lemma
//!
//! All three live in one sled database as separate trees. The pipeline never
//! writes: it reads an [`AnnotationSnapshot`] at startup and works from that.
//! New labels arrive through the append-only `import_*` operations, which
//! refuse to overwrite anything already recorded.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Limit sled's page cache; the snapshot serves every lookup
const SLED_CACHE_BYTES: u64 = 64 * 1024 * 1024;

/// The three annotation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Exclusion,
    ManualClass,
    ManualLemma,
}

impl Table {
    pub fn tree_name(&self) -> &'static str {
        match self {
            Table::Exclusion => "exclusion",
            Table::ManualClass => "manual_class",
            Table::ManualLemma => "manual_lemma",
        }
    }
}

/// Outcome of an append-only import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// New keys written
    pub inserted: usize,
    /// Keys already present with the same value
    pub unchanged: usize,
    /// Rows refused because they contradict what is stored
    pub conflicts: Vec<String>,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub exclusion: usize,
    pub manual_class: usize,
    pub manual_lemma: usize,
}

/// Handle to the on-disk store
pub struct AnnotationStore {
    db: sled::Db,
    exclusion: sled::Tree,
    manual_class: sled::Tree,
    manual_lemma: sled::Tree,
    path: PathBuf,
}

impl AnnotationStore {
    /// Open the store, creating the database and its tables if absent
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = sled::Config::new()
            .path(&path)
            .cache_capacity(SLED_CACHE_BYTES)
            .open()
            .map_err(|source| Error::StoreOpen {
                path: path.clone(),
                source,
            })?;

        let open_tree = |table: Table| {
            db.open_tree(table.tree_name())
                .map_err(|source| Error::StoreOpen {
                    path: path.clone(),
                    source,
                })
        };
        let exclusion = open_tree(Table::Exclusion)?;
        let manual_class = open_tree(Table::ManualClass)?;
        let manual_lemma = open_tree(Table::ManualLemma)?;

        info!("Opened annotation store at {:?}", path);
        Ok(Self {
            db,
            exclusion,
            manual_class,
            manual_lemma,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tree(&self, table: Table) -> &sled::Tree {
        match table {
            Table::Exclusion => &self.exclusion,
            Table::ManualClass => &self.manual_class,
            Table::ManualLemma => &self.manual_lemma,
        }
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            exclusion: self.exclusion.len(),
            manual_class: self.manual_class.len(),
            manual_lemma: self.manual_lemma.len(),
        }
    }

    /// Read all three tables into memory
    pub fn snapshot(&self) -> Result<AnnotationSnapshot> {
        let snapshot = AnnotationSnapshot {
            exclusion: self.load_flags(Table::Exclusion)?,
            manual_class: self.load_flags(Table::ManualClass)?,
            manual_lemma: self.load_lemmas()?,
        };
        snapshot.verify()?;
        Ok(snapshot)
    }

    fn load_flags(&self, table: Table) -> Result<AHashMap<String, bool>> {
        let start = Instant::now();
        let tree = self.tree(table);
        let mut map = AHashMap::with_capacity(tree.len());

        for entry in tree.iter() {
            let (key, value) = entry?;
            let word = decode_key(table, &key)?;
            let flag = decode_flag(table, &word, &value)?;
            map.insert(word, flag);
        }

        info!(
            "{} table load took {:.3}s ({} entries)",
            table.tree_name(),
            start.elapsed().as_secs_f64(),
            map.len()
        );
        Ok(map)
    }

    fn load_lemmas(&self) -> Result<AHashMap<String, String>> {
        let start = Instant::now();
        let table = Table::ManualLemma;
        let mut map = AHashMap::with_capacity(self.manual_lemma.len());

        for entry in self.manual_lemma.iter() {
            let (key, value) = entry?;
            let word = decode_key(table, &key)?;
            let lemma = String::from_utf8(value.to_vec()).map_err(|e| Error::CorruptValue {
                table: table.tree_name(),
                key: word.clone(),
                reason: e.to_string(),
            })?;
            map.insert(word, lemma);
        }

        info!(
            "{} table load took {:.3}s ({} entries)",
            table.tree_name(),
            start.elapsed().as_secs_f64(),
            map.len()
        );
        Ok(map)
    }

    /// Append boolean labels to the exclusion or manual-class table
    pub fn import_flags<S: AsRef<str>>(&self, table: Table, rows: &[(S, bool)]) -> Result<ImportReport> {
        if table == Table::ManualLemma {
            return Err(Error::InvalidConfig(
                "manual_lemma holds lemmas, not flags".to_string(),
            ));
        }

        let tree = self.tree(table);
        let mut report = ImportReport::default();

        for (word, flag) in rows {
            let word = word.as_ref();
            let value = [u8::from(*flag)];
            match tree.compare_and_swap(word.as_bytes(), None as Option<&[u8]>, Some(&value[..]))? {
                Ok(()) => report.inserted += 1,
                Err(existing) if existing.current.as_deref() == Some(&value[..]) => {
                    report.unchanged += 1
                }
                Err(_) => {
                    warn!("{}: keeping stored label for {:?}", table.tree_name(), word);
                    report.conflicts.push(word.to_string());
                }
            }
        }

        self.db.flush()?;
        debug!("Imported into {}: {:?}", table.tree_name(), report);
        Ok(report)
    }

    /// Append word → lemma corrections; both sides stay unique
    pub fn import_lemmas<S: AsRef<str>>(&self, rows: &[(S, S)]) -> Result<ImportReport> {
        let table = Table::ManualLemma;
        let mut claimed: AHashSet<String> = self
            .load_lemmas()?
            .into_iter()
            .map(|(_, lemma)| lemma)
            .collect();
        let mut report = ImportReport::default();

        for (word, lemma) in rows {
            let (word, lemma) = (word.as_ref(), lemma.as_ref());

            if let Some(current) = self.manual_lemma.get(word.as_bytes())? {
                if current.as_ref() == lemma.as_bytes() {
                    report.unchanged += 1;
                } else {
                    warn!("{}: keeping stored lemma for {:?}", table.tree_name(), word);
                    report.conflicts.push(word.to_string());
                }
                continue;
            }
            if claimed.contains(lemma) {
                warn!(
                    "{}: lemma {:?} already belongs to another word, skipping {:?}",
                    table.tree_name(),
                    lemma,
                    word
                );
                report.conflicts.push(word.to_string());
                continue;
            }

            match self.manual_lemma.compare_and_swap(
                word.as_bytes(),
                None as Option<&[u8]>,
                Some(lemma.as_bytes()),
            )? {
                Ok(()) => {
                    claimed.insert(lemma.to_string());
                    report.inserted += 1;
                }
                Err(_) => report.conflicts.push(word.to_string()),
            }
        }

        self.db.flush()?;
        debug!("Imported into {}: {:?}", table.tree_name(), report);
        Ok(report)
    }

    /// All labeled rows of the manual-class table, sorted by word
    pub fn manual_class_rows(&self) -> Result<Vec<(String, bool)>> {
        let table = Table::ManualClass;
        self.manual_class
            .iter()
            .map(|entry| {
                let (key, value) = entry?;
                let word = decode_key(table, &key)?;
                let flag = decode_flag(table, &word, &value)?;
                Ok((word, flag))
            })
            .collect()
    }
}

fn decode_key(table: Table, key: &[u8]) -> Result<String> {
    String::from_utf8(key.to_vec()).map_err(|e| Error::CorruptValue {
        table: table.tree_name(),
        key: String::from_utf8_lossy(key).into_owned(),
        reason: e.to_string(),
    })
}

fn decode_flag(table: Table, word: &str, value: &[u8]) -> Result<bool> {
    match value {
        [0] => Ok(false),
        [1] => Ok(true),
        other => Err(Error::CorruptValue {
            table: table.tree_name(),
            key: word.to_string(),
            reason: format!("expected a single 0/1 byte, found {:?}", other),
        }),
    }
}

/// Immutable in-memory copy of the store, shared by the pipeline stages
#[derive(Debug, Clone, Default)]
pub struct AnnotationSnapshot {
    exclusion: AHashMap<String, bool>,
    manual_class: AHashMap<String, bool>,
    manual_lemma: AHashMap<String, String>,
}

impl AnnotationSnapshot {
    /// Build a snapshot directly from maps, checking the lemma invariant
    pub fn from_maps(
        exclusion: AHashMap<String, bool>,
        manual_class: AHashMap<String, bool>,
        manual_lemma: AHashMap<String, String>,
    ) -> Result<Self> {
        let snapshot = Self {
            exclusion,
            manual_class,
            manual_lemma,
        };
        snapshot.verify()?;
        Ok(snapshot)
    }

    /// `Some(true)` if the word is on the exclusion list, `None` if unknown
    pub fn exclusion(&self, word: &str) -> Option<bool> {
        self.exclusion.get(word).copied()
    }

    /// `Some(true)` if a human marked the word as target language
    pub fn manual_class(&self, word: &str) -> Option<bool> {
        self.manual_class.get(word).copied()
    }

    pub fn manual_lemma(&self, word: &str) -> Option<&str> {
        self.manual_lemma.get(word).map(String::as_str)
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            exclusion: self.exclusion.len(),
            manual_class: self.manual_class.len(),
            manual_lemma: self.manual_lemma.len(),
        }
    }

    /// Manual lemmas must be unique across words
    fn verify(&self) -> Result<()> {
        let mut owners: AHashMap<&str, &str> = AHashMap::with_capacity(self.manual_lemma.len());
        let mut clashes = Vec::new();

        for (word, lemma) in &self.manual_lemma {
            if let Some(other) = owners.insert(lemma.as_str(), word.as_str()) {
                clashes.push(format!("{:?} claimed by {:?} and {:?}", lemma, other, word));
            }
        }

        if clashes.is_empty() {
            Ok(())
        } else {
            clashes.sort();
            Err(Error::InconsistentStore(format!(
                "duplicate manual lemmas: {}",
                clashes.join("; ")
            )))
        }
    }
}
