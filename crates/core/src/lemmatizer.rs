//! Noun lemmatization
//!
//! Maps an inflected surface form to its dictionary base form using the
//! classic detachment rules for English nouns plus a table of irregular
//! plurals. When a lexicon of known base forms is supplied, a rule's output
//! is only accepted if the lexicon knows it and the shortest accepted form
//! wins; without one, the most specific matching rule is trusted. Words
//! that only look inflected (always, news, abdomen) map to themselves.

use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use tracing::info;

use crate::Result;

/// Surface form to base form
pub trait Lemmatize: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

/// Detachment rules, most specific suffix first
static NOUN_RULES: [(&str, &str); 9] = [
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

/// Endings that look plural but usually are not
const SINGULAR_ENDINGS: [&str; 3] = ["ss", "us", "is"];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("dice", "die"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("lenses", "lens"),
    ("biases", "bias"),
    ("aliases", "alias"),
    ("atlases", "atlas"),
    ("canvases", "canvas"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("statuses", "status"),
    ("geniuses", "genius"),
    ("circuses", "circus"),
    ("choruses", "chorus"),
    ("censuses", "census"),
    ("species", "species"),
    ("series", "series"),
];

/// Words whose endings match a rule but which are already base forms
const INVARIANT_WORDS: &[&str] = &[
    // function words and adverbs ending in -s
    "always", "perhaps", "sometimes", "nevertheless", "towards", "afterwards", "besides",
    "whereas", "nowadays", "indoors", "outdoors", "upstairs", "downstairs", "overseas",
    "whereabouts", "hers", "ours", "yours", "theirs", "its", "his", "this", "thus", "was",
    "has", "does", "goes", "yes", "less",
    // singular nouns ending in -s
    "news", "lens", "means", "chaos", "cosmos", "ethos", "pathos", "kudos", "atlas", "alias",
    "bias", "canvas", "gas", "christmas", "physics", "mathematics", "politics", "economics",
    "ethics", "athletics", "statistics", "linguistics", "electronics", "genetics", "measles",
    "diabetes", "herpes", "rabies", "headquarters",
    // singular nouns ending in -men
    "omen", "amen", "abdomen", "specimen", "regimen", "stamen", "acumen", "albumen", "bitumen",
    "hymen", "semen", "lumen", "rumen", "yemen",
];

const MIN_LEMMA_LEN: usize = 2;

/// `-ies` words with a stem this short take `-ie` (ties, lies, pies)
const SHORT_IES_STEM: usize = 2;

#[derive(Debug, Clone)]
pub struct RuleLemmatizer {
    exceptions: AHashMap<String, String>,
    invariant: AHashSet<String>,
    lexicon: Option<AHashSet<String>>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        let exceptions = IRREGULAR_PLURALS
            .iter()
            .map(|(w, l)| (w.to_string(), l.to_string()))
            .collect();
        let invariant = INVARIANT_WORDS.iter().map(|w| w.to_string()).collect();
        Self {
            exceptions,
            invariant,
            lexicon: None,
        }
    }

    /// Accept rule output only when it is a known base form
    pub fn with_lexicon<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lexicon = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Load a lexicon file with one base form per line
    pub fn with_lexicon_file(self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
            .collect();
        info!("Loaded lemma lexicon with {} entries from {:?}", words.len(), path);
        Ok(self.with_lexicon(words))
    }

    /// Add or replace irregular forms
    pub fn with_exceptions<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.exceptions.extend(pairs);
        self
    }

    /// Rule outputs as (matched suffix, lemma)
    fn candidates<'a>(word: &'a str) -> impl Iterator<Item = (&'static str, String)> + 'a {
        NOUN_RULES.iter().filter_map(move |&(suffix, replacement)| {
            let stem = word.strip_suffix(suffix)?;
            let replacement = if suffix == "ies" && stem.chars().count() <= SHORT_IES_STEM {
                "ie"
            } else {
                replacement
            };
            let lemma = format!("{}{}", stem, replacement);
            (lemma.chars().count() >= MIN_LEMMA_LEN).then_some((suffix, lemma))
        })
    }

    fn lemmatize_with_lexicon(&self, word: &str, lexicon: &AHashSet<String>) -> String {
        let mut forms: Vec<String> = Vec::new();
        if lexicon.contains(word) {
            forms.push(word.to_string());
        }
        forms.extend(
            Self::candidates(word)
                .map(|(_, lemma)| lemma)
                .filter(|c| lexicon.contains(c)),
        );

        forms
            .into_iter()
            .min_by_key(|f| f.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_by_rules(&self, word: &str) -> String {
        if SINGULAR_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }
        // "ses" is ambiguous without a lexicon (houses, buses); plain "s" is
        // right far more often
        Self::candidates(word)
            .find(|(suffix, _)| *suffix != "ses")
            .map(|(_, lemma)| lemma)
            .unwrap_or_else(|| word.to_string())
    }
}

impl Lemmatize for RuleLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }
        match self.lexicon {
            Some(ref lexicon) => self.lemmatize_with_lexicon(word, lexicon),
            None => self.lemmatize_by_rules(word),
        }
    }
}
