//! Coarse mood signal of an utterance.
//!
//! Reported alongside every turn and logged. It never influences routing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::fold_case;

/// Mood inferred from keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Stress,
    Sadness,
    Positive,
    #[default]
    Unknown,
}

const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (Mood::Stress, &["stressed", "anxious", "overwhelmed", "worried"]),
    (Mood::Sadness, &["sad", "down", "upset", "depressed"]),
    (Mood::Positive, &["happy", "good", "great"]),
];

static MOOD_PATTERNS: LazyLock<Vec<(Mood, Regex)>> = LazyLock::new(|| {
    MOOD_KEYWORDS
        .iter()
        .map(|(mood, words)| {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"\b(?:{alternation})\b"))
                .expect("escaped mood keywords always compile");
            (*mood, re)
        })
        .collect()
});

impl Mood {
    /// Detect the mood of an utterance; the first matching group wins.
    pub fn detect(utterance: &str) -> Mood {
        let lower = fold_case(utterance);
        MOOD_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(&lower))
            .map_or(Mood::Unknown, |(mood, _)| *mood)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Stress => "stress",
            Mood::Sadness => "sadness",
            Mood::Positive => "positive",
            Mood::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Mood::detect("I'm so Stressed about exams"), Mood::Stress);
        assert_eq!(Mood::detect("feeling down today"), Mood::Sadness);
        assert_eq!(Mood::detect("what a great day"), Mood::Positive);
        assert_eq!(Mood::detect("what is mental health?"), Mood::Unknown);
    }

    #[test]
    fn test_first_group_wins() {
        assert_eq!(Mood::detect("happy but worried"), Mood::Stress);
    }

    #[test]
    fn test_every_group_compiles() {
        let moods: Vec<Mood> = MOOD_PATTERNS.iter().map(|(mood, _)| *mood).collect();
        assert_eq!(moods, vec![Mood::Stress, Mood::Sadness, Mood::Positive]);
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(Mood::detect("downtown"), Mood::Unknown);
    }
}
