//! Intent classification over bag-of-presence feature vectors.
//!
//! # Architecture
//!
//! - [`TextNormalizer`](crate::analysis::TextNormalizer) turns an utterance into tokens
//! - [`FeatureEncoder`] maps tokens onto a fixed [`Vocabulary`] (1.0 = present)
//! - [`IntentScorer`] is the opaque model: one score per label, in label order
//! - [`IntentClassifier`] applies the confidence threshold and ranks labels
//!
//! Two scorers are provided: [`LinearScorer`], loaded from a JSON classifier
//! artifact, and [`PrototypeScorer`], which compares an utterance with the
//! example patterns of each intent.
//!
//! # Example
//!
//! ```rust,no_run
//! use haven::ml::intent_classifier::IntentClassifier;
//!
//! # fn main() -> haven::error::Result<()> {
//! let classifier = IntentClassifier::from_artifact("models/classifier.json", 0.25)?;
//! if let Some(intent) = classifier.classify("hi there")? {
//!     println!("{} ({:.2})", intent.label, intent.score);
//! }
//! # Ok(())
//! # }
//! ```

mod classifier;
mod encoder;
mod linear;
mod prototype;
mod scorer;
mod types;

// Public exports
pub use classifier::{DEFAULT_CONFIDENCE_THRESHOLD, IntentClassifier, rank_scores};
pub use encoder::{FeatureEncoder, Vocabulary};
pub use linear::{Activation, ClassifierArtifact, LinearScorer};
pub use prototype::PrototypeScorer;
pub use scorer::IntentScorer;
pub use types::{IntentSample, ScoredIntent};
