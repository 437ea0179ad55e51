//! Content store: everything the engine says that is not computed.
//!
//! - [`IntentCatalog`] - intent tags with example patterns and response variants
//! - [`ResponseCatalog`] - preloaded or file-backed access to the intent catalog
//! - [`ExerciseLibrary`] - guided breathing and mindfulness exercises
//! - [`FaqEntry`] - the static FAQ table
//! - [`CannedReplies`] - every fixed reply string
//!
//! Content is read once and shared read-only between sessions.

pub mod catalog;
pub mod exercises;
pub mod faq;
pub mod intents;
pub mod replies;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use catalog::ResponseCatalog;
pub use exercises::{ExerciseLibrary, GuidedExercise};
pub use faq::FaqEntry;
pub use intents::{IntentCatalog, IntentDefinition};
pub use replies::CannedReplies;

/// Static content that ships alongside the intent catalog.
///
/// Every section is optional in the JSON file and falls back to the
/// built-in content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    /// FAQ table, searched in order.
    pub faq: Vec<FaqEntry>,
    /// Exercises grouped by category.
    pub exercises: ExerciseLibrary,
    /// Fixed reply strings.
    pub replies: CannedReplies,
}

impl Default for ContentPack {
    fn default() -> Self {
        Self {
            faq: faq::builtin_faq(),
            exercises: ExerciseLibrary::builtin(),
            replies: CannedReplies::default(),
        }
    }
}

impl ContentPack {
    /// Load a content pack from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let pack: ContentPack = serde_json::from_str(&content)?;
        pack.exercises.validate()?;
        Ok(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_pack_uses_builtin_sections() {
        let json = r#"{"replies": {"greeting": "Hi! What's on your mind?"}}"#;
        let pack: ContentPack = serde_json::from_str(json).unwrap();

        assert_eq!(pack.replies.greeting, "Hi! What's on your mind?");
        assert_eq!(pack.replies.thanks, CannedReplies::default().thanks);
        assert_eq!(pack.faq.len(), faq::builtin_faq().len());
        assert!(pack.exercises.category("mindfulness").is_some());
    }
}
