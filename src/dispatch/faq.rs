//! Keyword search over the FAQ table.
//!
//! The keywords of an entry are the content words of its question variants
//! (unicode-word tokenized, lower-cased, stop words and question words
//! removed). An entry matches when any of its keywords occurs anywhere in
//! the lower-cased utterance, so "stress" also answers "stressful week".
//! Entries are tried in table order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::token_filter::{CaseFoldFilter, StopFilter, fold_case};
use crate::analysis::tokenizer::UnicodeWordTokenizer;
use crate::content::FaqEntry;
use crate::error::Result;

// Words every question shares; matching on them would answer anything.
const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "do", "does", "i",
    "me", "my", "you", "your", "some", "any", "define",
];

#[derive(Debug, Clone)]
struct CompiledEntry {
    keywords: Vec<String>,
    answer: String,
}

/// First-match FAQ lookup.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<CompiledEntry>,
}

impl FaqMatcher {
    /// The analyzer that turns question variants into keywords.
    pub fn keyword_analyzer() -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(CaseFoldFilter::new()))
            .add_filter(Arc::new(StopFilter::english().extend(QUESTION_WORDS.iter().copied())))
            .with_name("faq_keywords")
    }

    pub fn new(entries: &[FaqEntry]) -> Result<Self> {
        let analyzer = Self::keyword_analyzer();

        let entries = entries
            .iter()
            .map(|entry| -> Result<CompiledEntry> {
                let mut seen = HashSet::new();
                let mut keywords = Vec::new();
                for question in &entry.questions {
                    for word in analyzer.words(question)? {
                        if seen.insert(word.clone()) {
                            keywords.push(word);
                        }
                    }
                }

                Ok(CompiledEntry {
                    keywords,
                    answer: entry.answer.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FaqMatcher { entries })
    }

    /// Answer of the first entry sharing a keyword with the utterance.
    pub fn find(&self, utterance: &str) -> Option<&str> {
        let message = fold_case(utterance);
        self.entries
            .iter()
            .find(|entry| entry.keywords.iter().any(|k| message.contains(k.as_str())))
            .map(|entry| entry.answer.as_str())
    }

    /// Keywords per entry, in table order.
    pub fn keywords(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(|entry| entry.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
