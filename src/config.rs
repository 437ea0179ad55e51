//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "confidence_threshold": 0.25,
//!   "intents_path": "data/intents.json",
//!   "content_path": "data/content.json",
//!   "classifier": {"type": "artifact", "path": "data/classifier.json"},
//!   "exercise_category": "mindfulness",
//!   "seed": null,
//!   "eager_content": true
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HavenError, Result};
use crate::ml::intent_classifier::DEFAULT_CONFIDENCE_THRESHOLD;

/// Where the intent classifier comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifierSource {
    /// A JSON classifier artifact (vocabulary, labels, weights).
    Artifact { path: PathBuf },
    /// Prototypes built from the intent catalog's example patterns.
    ///
    /// Built once at startup. If the intents file cannot be read then, the
    /// engine stays degraded until it is restarted, even after later turns
    /// manage to load the file for responses.
    #[default]
    Patterns,
    /// No classifier; every turn goes straight to the FAQ.
    Disabled,
}

/// Configuration of the dispatch engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scores at or below this value never resolve an intent.
    pub confidence_threshold: f64,

    /// Intents file (tags, patterns, responses).
    pub intents_path: PathBuf,

    /// Optional content pack (FAQ, exercises, reply texts).
    pub content_path: Option<PathBuf>,

    pub classifier: ClassifierSource,

    /// Category the negative-affect exercise is drawn from.
    pub exercise_category: String,

    /// Seed for response selection; random when absent.
    pub seed: Option<u64>,

    /// Load the intents file at startup and refuse to start without it.
    ///
    /// Without it a missing file is retried on every turn, but a
    /// [`ClassifierSource::Patterns`] classifier is not rebuilt.
    pub eager_content: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            intents_path: PathBuf::from("intents.json"),
            content_path: None,
            classifier: ClassifierSource::default(),
            exercise_category: "mindfulness".to_string(),
            seed: None,
            eager_content: false,
        }
    }
}

impl EngineConfig {
    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HavenError::config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.confidence_threshold.is_finite() {
            return Err(HavenError::config("confidence_threshold must be a finite number"));
        }
        if self.exercise_category.trim().is_empty() {
            return Err(HavenError::config("exercise_category cannot be empty"));
        }
        Ok(())
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to<P: AsRef<Path>>(mut self, base: P) -> Self {
        let base = base.as_ref();
        let resolve = |path: &Path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };

        self.intents_path = resolve(&self.intents_path);
        self.content_path = self.content_path.as_deref().map(resolve);
        if let ClassifierSource::Artifact { path } = &mut self.classifier {
            *path = resolve(path);
        }
        self
    }
}
