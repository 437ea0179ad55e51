//! Case folding.
//!
//! Lower-cases text and replaces typographic apostrophes (`’`, `‘`, `ʼ`) with
//! the ASCII one, so "Don’t" from a phone keyboard and "don't" compare equal.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lower-case `text` and normalize apostrophes.
///
/// ```
/// use haven::analysis::token_filter::fold_case;
///
/// assert_eq!(fold_case("I Don’t Feel GOOD"), "i don't feel good");
/// ```
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Applies [`fold_case`] to every token.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseFoldFilter;

impl CaseFoldFilter {
    pub fn new() -> Self {
        CaseFoldFilter
    }
}

impl Filter for CaseFoldFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            let folded = fold_case(&token.text);
            token.replace_text(folded)
        })))
    }

    fn name(&self) -> &'static str {
        "case_fold"
    }
}
