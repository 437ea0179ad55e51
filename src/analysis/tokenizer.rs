//! Splitting utterances into tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// First stage of a pipeline: raw text to tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short identifier used in analyzer names and debug output.
    fn name(&self) -> &'static str;
}

pub mod unicode_word;

pub use unicode_word::UnicodeWordTokenizer;
