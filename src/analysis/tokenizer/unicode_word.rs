//! Word tokenizer based on Unicode word boundaries (UAX #29).
//!
//! Segments without any alphanumeric character (spaces, punctuation, emoji)
//! are dropped. An apostrophe between letters is word-internal, so `don't`
//! and `I'm` stay single tokens.
//!
//! ```
//! use haven::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
//!
//! let words: Vec<String> = UnicodeWordTokenizer::new()
//!     .tokenize("I don't feel good.")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(words, vec!["I", "don't", "feel", "good"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (start, segment) in text.split_word_bound_indices() {
            if segment.chars().any(char::is_alphanumeric) {
                let end = start + segment.len();
                tokens.push(Token::at(segment, tokens.len(), start..end));
            }
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
