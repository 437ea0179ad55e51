//! Tokenizer plus an ordered chain of filters.
//!
//! ```
//! use std::sync::Arc;
//! use haven::analysis::analyzer::PipelineAnalyzer;
//! use haven::analysis::token_filter::{CaseFoldFilter, StopFilter};
//! use haven::analysis::tokenizer::UnicodeWordTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
//!     .add_filter(Arc::new(CaseFoldFilter::new()))
//!     .add_filter(Arc::new(StopFilter::english()))
//!     .with_name("keywords");
//!
//! assert_eq!(analyzer.words("What is THE answer?").unwrap(), vec!["what", "answer"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::{self, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// A pipeline with no filters, named after its tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: tokenizer.name().to_string(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Append a filter; filters run in the order they were added.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Texts of the analyzed tokens.
    pub fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(token::texts(self.analyze(text)?))
    }

    /// Names of the stages, tokenizer first.
    pub fn stages(&self) -> Vec<&'static str> {
        std::iter::once(self.tokenizer.name())
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(text)?, |tokens, filter| {
                filter.filter(tokens)
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("stages", &self.stages())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::{CaseFoldFilter, LemmaFilter};
    use crate::analysis::tokenizer::UnicodeWordTokenizer;

    #[test]
    fn test_filters_run_in_order() {
        // Lemmatizing before folding misses the upper-case plural
        let lemma_first = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(Arc::new(CaseFoldFilter::new()));
        assert_eq!(lemma_first.words("TIPS").unwrap(), vec!["tips"]);

        let fold_first = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(CaseFoldFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new()));
        assert_eq!(fold_first.words("TIPS").unwrap(), vec!["tip"]);
    }

    #[test]
    fn test_names() {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(CaseFoldFilter::new()));

        assert_eq!(analyzer.name(), "unicode_word");
        assert_eq!(analyzer.stages(), vec!["unicode_word", "case_fold"]);
        assert_eq!(analyzer.with_name("custom").name(), "custom");
    }
}
