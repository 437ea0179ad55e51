//! Lemmatizing token filter.
//!
//! Reduces inflected English words to a dictionary form. The rules follow the
//! noun detachment rules of WordNet's morphy (`-ies → -y`, `-sses → -ss`,
//! `-ches → -ch`, `-s → ""` ...) together with a table of irregular plurals.
//! There is no dictionary lookup, so words that merely look inflected
//! (`this`, `does`, `anxious`, `stress`) are protected explicitly.
//!
//! Lemmatization is a fixpoint: applying it to its own output changes nothing.
//!
//! # Examples
//!
//! ```
//! use haven::analysis::token_filter::lemma::{EnglishLemmatizer, Lemmatizer};
//!
//! let lemmatizer = EnglishLemmatizer::new();
//! assert_eq!(lemmatizer.lemmatize("exercises"), "exercise");
//! assert_eq!(lemmatizer.lemmatize("worries"), "worry");
//! assert_eq!(lemmatizer.lemmatize("children"), "child");
//! assert_eq!(lemmatizer.lemmatize("anxious"), "anxious");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a lower-case word to its lemma.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("crises", "crisis"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
];

// Words ending in "s" that are not plurals of anything.
const PROTECTED_WORDS: &[&str] = &[
    "always",
    "does",
    "goes",
    "lens",
    "means",
    "news",
    "ourselves",
    "perhaps",
    "series",
    "species",
    "themselves",
    "whereas",
    "yes",
    "yourselves",
];

static IRREGULAR_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_NOUNS.iter().copied().collect());

static PROTECTED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PROTECTED_WORDS.iter().copied().collect());

/// Rule-based English lemmatizer.
#[derive(Debug, Clone, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    /// Create a new English lemmatizer.
    pub fn new() -> Self {
        EnglishLemmatizer
    }

    /// Strip an inflectional suffix, if any rule applies.
    fn detach_suffix(word: &str) -> Option<String> {
        if word.len() <= 3
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
        {
            return None;
        }

        if word.len() > 4 && word.ends_with("ies") {
            return Some(format!("{}y", &word[..word.len() - 3]));
        }

        for suffix in ["sses", "xes", "zes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }

        word.strip_suffix('s').map(str::to_string)
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        // Contractions, numbers and non-ASCII words pass through unchanged
        if !word.chars().all(|c| c.is_ascii_lowercase()) || PROTECTED_SET.contains(word) {
            return word.to_string();
        }

        if let Some(lemma) = IRREGULAR_MAP.get(word) {
            return lemma.to_string();
        }

        match Self::detach_suffix(word) {
            Some(stem) => match IRREGULAR_MAP.get(stem.as_str()) {
                Some(lemma) => lemma.to_string(),
                None => stem,
            },
            None => word.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

/// Filter that applies lemmatization to tokens.
pub struct LemmaFilter {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the English lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(EnglishLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let lemmatized = tokens
            .map(|token| {
                let lemma = self.lemmatizer.lemmatize(&token.text);
                token.replace_text(lemma)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(lemmatized.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
