//! The FAQ table.

use serde::{Deserialize, Serialize};

/// A frequently asked question: several phrasings, one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Topic the entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Question variants.
    pub questions: Vec<String>,
    /// Answer text.
    pub answer: String,
}

impl FaqEntry {
    /// Create an entry without a category.
    pub fn new<I, S, A>(questions: I, answer: A) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        A: Into<String>,
    {
        Self {
            category: None,
            questions: questions.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    /// Set the category.
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// The FAQ table shipped with the assistant.
pub fn builtin_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            ["What is mental health?", "Can you define mental health?"],
            "Mental health includes our emotional, psychological, and social well-being.",
        )
        .with_category("General Mental Health"),
        FaqEntry::new(
            ["How do I manage stress?", "What are some stress relief techniques?"],
            "You can manage stress by exercising, practicing mindfulness, and seeking support.",
        )
        .with_category("Stress Management"),
        FaqEntry::new(
            ["What are some quick ways to relieve stress?"],
            "Try deep breathing, progressive muscle relaxation, or listening to calming music.",
        )
        .with_category("Stress Management"),
    ]
}
