//! Configuration file support for curation runs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wordsieve_core::TrainParams;
use wordsieve_filters::HeuristicConfig;
use wordsieve_formats::REVIEW_CHUNK_SIZE;

/// Complete run configuration; every section is optional in the file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    pub heuristics: HeuristicConfig,
    pub lemmatizer: LemmatizerConfig,
    pub store: StoreConfig,
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
}

impl SieveConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    /// Optional list of known base forms, one per line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<PathBuf>,
}

/// Annotation store location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cache.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model: PathBuf,
    /// Classification workers (unset = one per core)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    pub training: TrainParams,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("NGRAM_SVC.bin"),
            threads: None,
            training: TrainParams::default(),
        }
    }
}

/// Where review files go and how they are split
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub review_dir: PathBuf,
    pub review_chunk_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            review_dir: PathBuf::from("."),
            review_chunk_size: REVIEW_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SieveConfig::default();
        assert_eq!(config.store.path, PathBuf::from("cache.db"));
        assert_eq!(config.classifier.model, PathBuf::from("NGRAM_SVC.bin"));
        assert_eq!(config.output.review_chunk_size, 49_000);
        assert_eq!(config.heuristics.max_short_length, 2);
        assert!(config.classifier.threads.is_none());
    }

    #[test]
    fn test_save_and_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sieve.yaml");

        let mut config = SieveConfig::default();
        config.classifier.threads = Some(3);
        config.save(&path).unwrap();

        let loaded = SieveConfig::load(&path).unwrap();
        assert_eq!(loaded.classifier.threads, Some(3));
        assert_eq!(loaded.heuristics.blocked_suffixes, config.heuristics.blocked_suffixes);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sieve.toml");

        let mut config = SieveConfig::default();
        config.store.path = PathBuf::from("annotations.db");
        config.lemmatizer.lexicon = Some(PathBuf::from("nouns.txt"));
        config.save(&path).unwrap();

        let loaded = SieveConfig::load(&path).unwrap();
        assert_eq!(loaded.store.path, PathBuf::from("annotations.db"));
        assert_eq!(loaded.lemmatizer.lexicon, Some(PathBuf::from("nouns.txt")));
        assert_eq!(loaded.classifier.training.max_n, 4);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[heuristics]\nmax_rare_frequency = 5\n\n[output]\nreview_dir = \"review\"\n",
        )
        .unwrap();

        let config = SieveConfig::load(&path).unwrap();
        assert_eq!(config.heuristics.max_rare_frequency, 5);
        assert_eq!(config.heuristics.repeated_run, 3);
        assert_eq!(config.output.review_dir, PathBuf::from("review"));
        assert_eq!(config.output.review_chunk_size, 49_000);
        assert_eq!(config.store.path, PathBuf::from("cache.db"));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sieve.json");

        assert!(SieveConfig::default().save(&path).is_err());
        std::fs::write(&path, "{}").unwrap();
        assert!(SieveConfig::load(&path).is_err());
    }
}
