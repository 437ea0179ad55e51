//! Text analysis module for Haven.
//!
//! Raw utterances flow through a tokenizer and an ordered chain of filters
//! before they are matched against vocabularies and keyword tables:
//!
//! ```text
//! "I'm feeling Worried!" → Tokenizer → CaseFold → Lemma → ["i'm", "feeling", "worried"]
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
