//! Stop-word lists
//!
//! Union of the NLTK stop-word lists shipped by the `stop-words` crate for a
//! set of languages, plus any extra words from configuration. The default
//! configuration takes every shipped language.

use ahash::AHashSet;
use stop_words::{get, LANGUAGE};

use crate::{Error, Result};

/// Languages with an NLTK list, as (ISO 639-1 code, English name, crate enum)
const NLTK_LANGUAGES: [(&str, &str, LANGUAGE); 23] = [
    ("ar", "arabic", LANGUAGE::Arabic),
    ("az", "azerbaijani", LANGUAGE::Azerbaijani),
    ("da", "danish", LANGUAGE::Danish),
    ("nl", "dutch", LANGUAGE::Dutch),
    ("en", "english", LANGUAGE::English),
    ("fi", "finnish", LANGUAGE::Finnish),
    ("fr", "french", LANGUAGE::French),
    ("de", "german", LANGUAGE::German),
    ("el", "greek", LANGUAGE::Greek),
    ("hu", "hungarian", LANGUAGE::Hungarian),
    ("id", "indonesian", LANGUAGE::Indonesian),
    ("it", "italian", LANGUAGE::Italian),
    ("kk", "kazakh", LANGUAGE::Kazakh),
    ("ne", "nepali", LANGUAGE::Nepali),
    ("no", "norwegian", LANGUAGE::Norwegian),
    ("pt", "portuguese", LANGUAGE::Portuguese),
    ("ro", "romanian", LANGUAGE::Romanian),
    ("ru", "russian", LANGUAGE::Russian),
    ("sl", "slovenian", LANGUAGE::Slovenian),
    ("es", "spanish", LANGUAGE::Spanish),
    ("sv", "swedish", LANGUAGE::Swedish),
    ("tg", "tajik", LANGUAGE::Tajik),
    ("tr", "turkish", LANGUAGE::Turkish),
];

/// ISO codes of every language with a built-in list
pub fn supported_languages() -> Vec<String> {
    NLTK_LANGUAGES.iter().map(|(code, _, _)| code.to_string()).collect()
}

/// A lowercase stop-word set
#[derive(Debug, Clone, Default)]
pub struct StopWordList {
    words: AHashSet<String>,
}

impl StopWordList {
    /// Build the union of the lists for `languages` plus `extra`.
    ///
    /// Language codes accept either ISO 639-1 (`en`) or the English name
    /// (`english`). Languages without a built-in list are rejected.
    pub fn for_languages<S: AsRef<str>>(languages: &[S], extra: &[S]) -> Result<Self> {
        let mut words = AHashSet::new();

        for code in languages {
            let lang = Self::parse_language(code.as_ref())?;
            words.extend(
                get(lang)
                    .iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty()),
            );
        }
        words.extend(extra.iter().map(|w| w.as_ref().to_lowercase()));

        Ok(Self { words })
    }

    /// Build a list from explicit words only
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn parse_language(code: &str) -> Result<LANGUAGE> {
        let code = code.to_lowercase();
        NLTK_LANGUAGES
            .iter()
            .find(|(iso, name, _)| *iso == code || *name == code)
            .map(|(_, _, lang)| lang.clone())
            .ok_or_else(|| Error::InvalidConfig(format!("Unsupported stop-word language: {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Common English nouns that no stop-word list may contain
    const CONTENT_WORDS: [&str; 16] = [
        "world", "information", "system", "value", "work", "research", "problem", "state",
        "home", "group", "area", "fact", "point", "room", "thing", "garden",
    ];

    #[test]
    fn test_english_list() {
        let list = StopWordList::for_languages(&["en"], &[]).unwrap();
        assert!(list.contains("the"));
        assert!(list.contains("and"));
        assert!(list.contains("which"));
        assert!(!list.contains("aardvark"));
        // NLTK's English list is short; a list this size is the ISO one
        assert!(list.len() < 300, "unexpected English list size {}", list.len());
    }

    #[test]
    fn test_english_list_keeps_content_words() {
        let list = StopWordList::for_languages(&["en"], &[]).unwrap();
        for word in CONTENT_WORDS {
            assert!(!list.contains(word), "{} is not a stop word", word);
        }
    }

    #[test]
    fn test_all_languages_keep_content_words() {
        let list = StopWordList::for_languages(&supported_languages(), &[]).unwrap();
        assert!(list.contains("the"));
        assert!(list.contains("und"));
        assert!(list.contains("och"));
        assert!(!list.contains(""));
        for word in CONTENT_WORDS {
            assert!(!list.contains(word), "{} is not a stop word", word);
        }
    }

    #[test]
    fn test_every_supported_language_loads() {
        for code in supported_languages() {
            let list = StopWordList::for_languages(&[code.as_str()], &[]).unwrap();
            assert!(!list.is_empty(), "empty list for {}", code);
        }
    }

    #[test]
    fn test_union_and_extra() {
        let en = StopWordList::for_languages(&["en"], &[]).unwrap();
        let both = StopWordList::for_languages(&["en", "german"], &["zzyzx"]).unwrap();
        assert!(both.len() > en.len());
        assert!(both.contains("zzyzx"));
        assert!(both.contains("und"));
    }

    #[test]
    fn test_case_insensitive() {
        let list = StopWordList::from_words(&["The"]);
        assert!(list.contains("the"));
        assert!(list.contains("THE"));
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(StopWordList::for_languages(&["klingon"], &[]).is_err());
        // no NLTK list for Polish
        assert!(StopWordList::for_languages(&["pl"], &[]).is_err());
    }
}
