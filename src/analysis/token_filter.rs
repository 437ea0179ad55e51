//! Token filters: the stages after the tokenizer.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Rewrites or drops tokens of a stream.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short identifier used in debug output.
    fn name(&self) -> &'static str;
}

pub mod case_fold;
pub mod lemma;
pub mod stop;

pub use case_fold::{CaseFoldFilter, fold_case};
pub use lemma::{EnglishLemmatizer, LemmaFilter, Lemmatizer};
pub use stop::StopFilter;
