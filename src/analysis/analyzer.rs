//! Analyzers combine a tokenizer with a chain of filters.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Text in, finished tokens out.
///
/// Analyzers live in the shared engine context and must be `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Run the whole pipeline over `text`.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Name shown in debug output.
    fn name(&self) -> &str;
}

pub mod normalizer;
pub mod pipeline;

pub use normalizer::TextNormalizer;
pub use pipeline::PipelineAnalyzer;
