//! Stop word removal.
//!
//! Only the FAQ keyword extraction uses it: question variants are reduced to
//! their content words before they are matched against utterances.
//!
//! ```
//! use haven::analysis::token::Token;
//! use haven::analysis::token_filter::{Filter, StopFilter};
//!
//! let filter = StopFilter::english().extend(["how"]);
//! let tokens = vec![Token::new("how", 0), Token::new("to", 1), Token::new("relax", 2)];
//! let kept: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].text, "relax");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Drops tokens whose text is in the stop list.
#[derive(Clone, Debug)]
pub struct StopFilter {
    words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// The English stop list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Add words to the stop list.
    pub fn extend<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Arc::unwrap_or_clone(self.words);
        set.extend(words.into_iter().map(Into::into));
        StopFilter {
            words: Arc::new(set),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words = Arc::clone(&self.words);
        Ok(Box::new(tokens.filter(move |token| !words.contains(&token.text))))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
