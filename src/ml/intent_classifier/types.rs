//! Samples and scores exchanged with the classifier.

use serde::{Deserialize, Serialize};

/// Example utterance for an intent, taken from the intent catalog patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSample {
    /// Utterance text.
    pub text: String,
    /// Tag the example belongs to.
    pub intent: String,
}

impl IntentSample {
    /// Create a new sample.
    pub fn new<T: Into<String>, I: Into<String>>(text: T, intent: I) -> Self {
        Self {
            text: text.into(),
            intent: intent.into(),
        }
    }
}

/// An intent label with its classifier confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntent {
    /// Intent tag.
    pub label: String,
    /// Confidence score reported by the scorer.
    pub score: f64,
}

impl ScoredIntent {
    /// Create a new scored intent.
    pub fn new<S: Into<String>>(label: S, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}
