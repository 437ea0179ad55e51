//! Intent catalog: tag → example patterns and response variants.
//!
//! File format:
//!
//! ```json
//! {"intents": [{"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]}]}
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HavenError, Result};
use crate::ml::intent_classifier::IntentSample;

/// One intent of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Intent tag, shared with the classifier label set.
    pub tag: String,
    /// Example utterances.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Response variants; all must be interchangeable.
    pub responses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IntentFile {
    intents: Vec<IntentDefinition>,
}

/// Mapping from intent tag to its definition.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    intents: Vec<IntentDefinition>,
    by_tag: HashMap<String, usize>,
}

impl IntentCatalog {
    /// Build a catalog, rejecting intents without responses.
    ///
    /// When a tag is repeated the first definition wins.
    pub fn new(intents: Vec<IntentDefinition>) -> Result<Self> {
        let mut by_tag = HashMap::with_capacity(intents.len());
        for (idx, intent) in intents.iter().enumerate() {
            if intent.responses.is_empty() {
                return Err(HavenError::content(format!(
                    "Intent '{}' has no responses",
                    intent.tag
                )));
            }
            by_tag.entry(intent.tag.clone()).or_insert(idx);
        }

        Ok(Self { intents, by_tag })
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: IntentFile = serde_json::from_str(json)?;
        Self::new(file.intents)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Response variants for a tag.
    pub fn responses(&self, tag: &str) -> Option<&[String]> {
        self.by_tag
            .get(tag)
            .map(|&idx| self.intents[idx].responses.as_slice())
    }

    /// Every (pattern, tag) pair, in catalog order.
    pub fn samples(&self) -> Vec<IntentSample> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent
                    .patterns
                    .iter()
                    .map(|pattern| IntentSample::new(pattern.clone(), intent.tag.clone()))
            })
            .collect()
    }

    /// Intent definitions in catalog order.
    pub fn intents(&self) -> &[IntentDefinition] {
        &self.intents
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTENTS: &str = r#"{
        "intents": [
            {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!", "Hi there!"]},
            {"tag": "goodbye", "patterns": ["bye"], "responses": ["Take care."]}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = IntentCatalog::from_json(INTENTS).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.responses("greeting").unwrap().len(), 2);
        assert_eq!(catalog.responses("goodbye").unwrap(), &["Take care."]);
        assert!(catalog.responses("unknown").is_none());
    }

    #[test]
    fn test_samples() {
        let catalog = IntentCatalog::from_json(INTENTS).unwrap();
        let samples = catalog.samples();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].text, "bye");
        assert_eq!(samples[2].intent, "goodbye");
    }

    #[test]
    fn test_empty_responses_rejected() {
        let json = r#"{"intents": [{"tag": "empty", "responses": []}]}"#;
        assert!(IntentCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(IntentCatalog::from_json("{\"intents\": 3}").is_err());
    }
}
