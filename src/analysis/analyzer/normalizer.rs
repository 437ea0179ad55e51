//! Text normalizer: the canonical token sequence of an utterance.
//!
//! Pipeline: Unicode word tokenization, lowercasing, lemmatization. The
//! resulting token sequence is what the feature encoder looks up in the
//! classifier vocabulary, so vocabularies must be built with the same
//! normalizer.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{CaseFoldFilter, LemmaFilter};
use crate::analysis::tokenizer::UnicodeWordTokenizer;
use crate::error::Result;

/// Tokenizes, lower-cases and lemmatizes raw utterances.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    inner: PipelineAnalyzer,
}

impl TextNormalizer {
    /// Create the standard English normalizer.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(CaseFoldFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .with_name("normalizer");

        TextNormalizer { inner: analyzer }
    }

    /// Create a normalizer around a custom pipeline.
    pub fn with_pipeline(inner: PipelineAnalyzer) -> Self {
        TextNormalizer { inner }
    }

    /// Normalize an utterance into its token sequence.
    ///
    /// Empty or whitespace-only input yields an empty sequence.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        self.inner.words(text)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for TextNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "normalizer"
    }
}
