//! Ordered chain of cheap word heuristics
//!
//! Each stage is a stateless predicate over a single word. Stages run in a
//! fixed order, each consuming the survivors of the previous one, so a word
//! dropped early can never come back.

use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result, StopWordList};

const VOWEL_LIKE: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Anything the chain can filter: a surface word with a corpus frequency
pub trait Candidate {
    fn surface(&self) -> &str;
    fn frequency(&self) -> u64;
}

/// Heuristic thresholds and word lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Words with at most this many characters are dropped
    pub max_short_length: usize,
    /// Words seen at most this many times are dropped
    pub max_rare_frequency: u64,
    /// Length of an identical-letter run that marks a word as noise
    pub repeated_run: usize,
    pub blocked_prefixes: Vec<String>,
    pub blocked_suffixes: Vec<String>,
    /// Words allowed to start with two vowels
    pub double_vowel_allow: Vec<String>,
    /// Stop-word languages (ISO 639-1 code or English name); every
    /// language with a built-in list by default
    pub stop_word_languages: Vec<String>,
    pub extra_stop_words: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_short_length: 2,
            max_rare_frequency: 2,
            repeated_run: 3,
            blocked_prefixes: vec!["al-".to_string()],
            blocked_suffixes: vec!["hr".to_string(), "com".to_string(), "eu".to_string()],
            double_vowel_allow: [
                "aardvark", "eerie", "eek", "eel", "llama", "ooh", "oops", "ooze", "oozing",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            stop_word_languages: crate::stopwords::supported_languages(),
            extra_stop_words: Vec::new(),
        }
    }
}

/// Counts for one stage of a filtering run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: String,
    pub input: usize,
    pub output: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl StageReport {
    pub fn new(stage: impl Into<String>, input: usize, output: usize, elapsed: Duration) -> Self {
        Self {
            stage: stage.into(),
            input,
            output,
            elapsed,
        }
    }

    pub fn removed(&self) -> usize {
        self.input.saturating_sub(self.output)
    }

    /// Share of the input removed by this stage, in percent
    pub fn reduction_pct(&self) -> f64 {
        if self.input == 0 {
            return 0.0;
        }
        (1.0 - self.output as f64 / self.input as f64) * 100.0
    }

    /// Log the stage the same way for every stage of the run
    pub fn log(&self) {
        info!(
            "{} took {:.3}s to process from {} to {} words (-{:.1}%)",
            self.stage,
            self.elapsed.as_secs_f64(),
            self.input,
            self.output,
            self.reduction_pct()
        );
    }
}

/// Time a filtering step and produce its report
pub fn timed<T, F>(stage: &str, items: Vec<T>, step: F) -> (Vec<T>, StageReport)
where
    F: FnOnce(Vec<T>) -> Vec<T>,
{
    let start = Instant::now();
    let input = items.len();
    let survivors = step(items);
    let report = StageReport::new(stage, input, survivors.len(), start.elapsed());
    report.log();
    (survivors, report)
}

pub fn is_short(word: &str, max_len: usize) -> bool {
    word.chars().count() <= max_len
}

pub fn is_rare(frequency: u64, max_frequency: u64) -> bool {
    frequency <= max_frequency
}

/// True if some character repeats `run` times in a row
pub fn has_repeated_run(word: &str, run: usize) -> bool {
    if run < 2 {
        return !word.is_empty();
    }
    let chars: Vec<char> = word.chars().collect();
    chars.windows(run).any(|w| w.iter().all(|&c| c == w[0]))
}

pub fn lacks_vowels(word: &str) -> bool {
    !word
        .chars()
        .any(|c| VOWEL_LIKE.contains(&c.to_ascii_lowercase()))
}

pub fn starts_with_double_vowel(word: &str, allow: &[String]) -> bool {
    if allow.iter().any(|w| w == word) {
        return false;
    }
    let mut chars = word.chars().map(|c| c.to_ascii_lowercase());
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), Some(_)) => VOWELS.contains(&a) && VOWELS.contains(&b),
        _ => false,
    }
}

/// Prefix/suffix blacklist compiled into one anchored pattern
#[derive(Debug, Clone)]
pub struct AffixBlacklist {
    pattern: Option<Regex>,
}

impl AffixBlacklist {
    pub fn new(prefixes: &[String], suffixes: &[String]) -> Result<Self> {
        let mut alternatives = Vec::new();
        for p in prefixes.iter().filter(|p| !p.is_empty()) {
            alternatives.push(format!("^{}", regex::escape(p)));
        }
        for s in suffixes.iter().filter(|s| !s.is_empty()) {
            alternatives.push(format!("{}$", regex::escape(s)));
        }

        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&alternatives.join("|"))?)
        };
        Ok(Self { pattern })
    }

    pub fn matches(&self, word: &str) -> bool {
        self.pattern.as_ref().map_or(false, |re| re.is_match(word))
    }
}

/// The fixed, ordered heuristic chain
#[derive(Debug, Clone)]
pub struct HeuristicChain {
    config: HeuristicConfig,
    affixes: AffixBlacklist,
    stop_words: StopWordList,
}

impl HeuristicChain {
    pub fn new(config: HeuristicConfig) -> Result<Self> {
        if config.repeated_run < 2 {
            return Err(Error::InvalidConfig(format!(
                "repeated_run must be at least 2, got {}",
                config.repeated_run
            )));
        }
        let affixes = AffixBlacklist::new(&config.blocked_prefixes, &config.blocked_suffixes)?;
        let stop_words =
            StopWordList::for_languages(&config.stop_word_languages, &config.extra_stop_words)?;

        Ok(Self {
            config,
            affixes,
            stop_words,
        })
    }

    /// Build a chain with an explicit stop-word list
    pub fn with_stop_words(config: HeuristicConfig, stop_words: StopWordList) -> Result<Self> {
        let mut chain = Self::new(HeuristicConfig {
            stop_word_languages: Vec::new(),
            extra_stop_words: Vec::new(),
            ..config.clone()
        })?;
        chain.config = config;
        chain.stop_words = stop_words;
        Ok(chain)
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Run every stage in order, returning survivors and one report per stage
    pub fn apply<T: Candidate>(&self, words: Vec<T>) -> (Vec<T>, Vec<StageReport>) {
        let cfg = &self.config;
        let mut reports = Vec::with_capacity(7);

        let (words, r) = timed("remove_short_words", words, |ws| {
            retain(ws, |w| !is_short(w.surface(), cfg.max_short_length))
        });
        reports.push(r);

        let (words, r) = timed("remove_infrequent_words", words, |ws| {
            retain(ws, |w| !is_rare(w.frequency(), cfg.max_rare_frequency))
        });
        reports.push(r);

        let (words, r) = timed("remove_repeated_letter_words", words, |ws| {
            retain(ws, |w| !has_repeated_run(w.surface(), cfg.repeated_run))
        });
        reports.push(r);

        let (words, r) = timed("remove_words_without_vowels", words, |ws| {
            retain(ws, |w| !lacks_vowels(w.surface()))
        });
        reports.push(r);

        let (words, r) = timed("remove_blocked_affixes", words, |ws| {
            retain(ws, |w| !self.affixes.matches(w.surface()))
        });
        reports.push(r);

        let (words, r) = timed("remove_double_vowel_prefix", words, |ws| {
            retain(ws, |w| {
                !starts_with_double_vowel(w.surface(), &cfg.double_vowel_allow)
            })
        });
        reports.push(r);

        let (words, r) = timed("remove_stop_words", words, |ws| {
            retain(ws, |w| !self.stop_words.contains(w.surface()))
        });
        reports.push(r);

        (words, reports)
    }
}

fn retain<T, F: Fn(&T) -> bool>(mut words: Vec<T>, keep: F) -> Vec<T> {
    words.retain(|w| keep(w));
    words
}
