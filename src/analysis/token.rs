//! Tokens flowing through the analysis pipeline.
//!
//! # Examples
//!
//! ```
//! use haven::analysis::token::Token;
//!
//! let token = Token::at("Worries", 3, 12..19);
//! assert_eq!(token.span, 12..19);
//!
//! let lemma = token.replace_text("worry");
//! assert_eq!(lemma.text, "worry");
//! assert_eq!(lemma.position, 3);
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One word of an utterance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Current text; filters rewrite it in place.
    pub text: String,

    /// Index of the word in the utterance (0-based).
    pub position: usize,

    /// Byte range of the original word in the utterance.
    pub span: Range<usize>,
}

impl Token {
    /// A token with no source span, mostly for tests.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            span: 0..0,
        }
    }

    /// A token taken from `span` of the utterance.
    pub fn at<S: Into<String>>(text: S, position: usize, span: Range<usize>) -> Self {
        Token {
            text: text.into(),
            position,
            span,
        }
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same token with new text; position and span are kept.
    pub fn replace_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Boxed iterator handed from the tokenizer through each filter.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

/// Texts of a stream, in order.
pub fn texts(tokens: TokenStream) -> Vec<String> {
    tokens.map(|token| token.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_text_keeps_span() {
        let token = Token::at("Feelings", 2, 10..18).replace_text("feeling");

        assert_eq!(token.text, "feeling");
        assert_eq!(token.position, 2);
        assert_eq!(token.span, 10..18);
        assert_eq!(token.len(), 7);
    }

    #[test]
    fn test_texts() {
        let tokens = vec![Token::new("deep", 0), Token::new("breathing", 1)];
        assert_eq!(texts(Box::new(tokens.into_iter())), vec!["deep", "breathing"]);
        assert!(texts(Box::new(std::iter::empty())).is_empty());
    }
}
