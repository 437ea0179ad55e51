//! Guided exercise library.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HavenError, Result};

/// A guided breathing or mindfulness exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedExercise {
    pub name: String,
    pub difficulty: String,
    pub duration: String,
    pub instructions: String,
}

impl GuidedExercise {
    fn new(name: &str, difficulty: &str, duration: &str, instructions: &str) -> Self {
        Self {
            name: name.to_string(),
            difficulty: difficulty.to_string(),
            duration: duration.to_string(),
            instructions: instructions.to_string(),
        }
    }
}

/// Exercises grouped by category ("breathing", "mindfulness", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseLibrary {
    categories: BTreeMap<String, Vec<GuidedExercise>>,
}

impl ExerciseLibrary {
    /// Create a library from categories.
    pub fn new(categories: BTreeMap<String, Vec<GuidedExercise>>) -> Result<Self> {
        let library = Self { categories };
        library.validate()?;
        Ok(library)
    }

    /// The exercises shipped with the assistant.
    pub fn builtin() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "breathing".to_string(),
            vec![
                GuidedExercise::new(
                    "4-7-8 Breathing",
                    "Beginner",
                    "5 minutes",
                    "Breathe in for 4 seconds, hold for 7 seconds, and exhale for 8 seconds.",
                ),
                GuidedExercise::new(
                    "Box Breathing",
                    "Intermediate",
                    "5 minutes",
                    "Inhale for 4 seconds, hold for 4 seconds, exhale for 4 seconds, hold for 4 seconds. Repeat.",
                ),
            ],
        );
        categories.insert(
            "mindfulness".to_string(),
            vec![
                GuidedExercise::new(
                    "5-4-3-2-1 Grounding",
                    "Beginner",
                    "5 minutes",
                    "Identify 5 things you see, 4 things you feel, 3 things you hear, 2 things you smell, and 1 thing you taste.",
                ),
                GuidedExercise::new(
                    "Body Scan Meditation",
                    "Advanced",
                    "10 minutes",
                    "Slowly bring attention to each part of your body, from your toes to your head, noticing any sensations.",
                ),
            ],
        );
        Self { categories }
    }

    /// Reject empty categories.
    pub fn validate(&self) -> Result<()> {
        match self.categories.iter().find(|(_, exercises)| exercises.is_empty()) {
            Some((name, _)) => Err(HavenError::content(format!(
                "Exercise category '{name}' is empty"
            ))),
            None => Ok(()),
        }
    }

    /// Exercises of a category.
    pub fn category(&self, name: &str) -> Option<&[GuidedExercise]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Total number of exercises.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the library holds no exercises.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ExerciseLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library() {
        let library = ExerciseLibrary::builtin();

        assert_eq!(library.len(), 4);
        assert_eq!(library.categories().collect::<Vec<_>>(), vec!["breathing", "mindfulness"]);
        assert_eq!(library.category("mindfulness").unwrap()[0].name, "5-4-3-2-1 Grounding");
        assert!(library.category("yoga").is_none());
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut categories = BTreeMap::new();
        categories.insert("empty".to_string(), Vec::new());
        assert!(ExerciseLibrary::new(categories).is_err());
    }

    #[test]
    fn test_deserialize_from_map() {
        let json = r#"{"sleep": [{"name": "Wind Down", "difficulty": "Beginner",
            "duration": "3 minutes", "instructions": "Dim the lights."}]}"#;
        let library: ExerciseLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(library.category("sleep").unwrap()[0].instructions, "Dim the lights.");
    }
}
