//! Thresholded intent classification.

use std::path::Path;
use std::sync::Arc;

use log::debug;

use super::encoder::{FeatureEncoder, Vocabulary};
use super::linear::ClassifierArtifact;
use super::prototype::PrototypeScorer;
use super::scorer::IntentScorer;
use super::types::{IntentSample, ScoredIntent};
use crate::analysis::TextNormalizer;
use crate::error::{HavenError, Result};

/// Minimum score (exclusive) a label needs to become the resolved intent.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.25;

/// Keep labels scoring strictly above `threshold`, best first.
///
/// The sort is stable, so equal scores keep their label-set order and the
/// lower-index label wins a tie.
pub fn rank_scores(scores: Vec<ScoredIntent>, threshold: f64) -> Vec<ScoredIntent> {
    let mut ranked: Vec<ScoredIntent> = scores
        .into_iter()
        .filter(|intent| intent.score > threshold)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Normalizer, encoder and scorer bound together with a confidence threshold.
pub struct IntentClassifier {
    normalizer: TextNormalizer,
    encoder: FeatureEncoder,
    scorer: Arc<dyn IntentScorer>,
    threshold: f64,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("vocabulary_size", &self.encoder.dimension())
            .field("labels", &self.scorer.labels())
            .field("scorer", &self.scorer.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl IntentClassifier {
    /// Create a classifier from its parts.
    pub fn new(
        normalizer: TextNormalizer,
        vocabulary: Vocabulary,
        scorer: Arc<dyn IntentScorer>,
        threshold: f64,
    ) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(HavenError::classifier("Confidence threshold must be finite"));
        }
        if scorer.labels().is_empty() {
            return Err(HavenError::classifier("Scorer has an empty label set"));
        }

        Ok(Self {
            normalizer,
            encoder: FeatureEncoder::new(Arc::new(vocabulary)),
            scorer,
            threshold,
        })
    }

    /// Load a classifier from a JSON artifact.
    pub fn from_artifact<P: AsRef<Path>>(path: P, threshold: f64) -> Result<Self> {
        let (vocabulary, scorer) = ClassifierArtifact::load(path)?.into_parts()?;
        Self::new(TextNormalizer::new(), vocabulary, Arc::new(scorer), threshold)
    }

    /// Build a prototype classifier from example utterances.
    pub fn from_samples(samples: &[IntentSample], threshold: f64) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let (vocabulary, scorer) = PrototypeScorer::from_samples(samples, &normalizer)?;
        Self::new(normalizer, vocabulary, Arc::new(scorer), threshold)
    }

    /// Feature vector for an utterance.
    pub fn features(&self, utterance: &str) -> Result<Vec<f64>> {
        let tokens = self.normalizer.normalize(utterance)?;
        Ok(self.encoder.encode(&tokens))
    }

    /// Score every label, in label-set order.
    pub fn scores(&self, utterance: &str) -> Result<Vec<ScoredIntent>> {
        let features = self.features(utterance)?;
        let scores = self.scorer.score(&features)?;
        let labels = self.scorer.labels();

        if scores.len() != labels.len() {
            return Err(HavenError::classifier(format!(
                "Scorer '{}' returned {} scores for {} labels",
                self.scorer.name(),
                scores.len(),
                labels.len()
            )));
        }

        Ok(labels
            .iter()
            .zip(scores)
            .map(|(label, score)| ScoredIntent::new(label.clone(), score))
            .collect())
    }

    /// Labels above the threshold, best first.
    pub fn rank(&self, utterance: &str) -> Result<Vec<ScoredIntent>> {
        Ok(rank_scores(self.scores(utterance)?, self.threshold))
    }

    /// Resolve the most confident intent, or `None` when no label clears the threshold.
    pub fn classify(&self, utterance: &str) -> Result<Option<ScoredIntent>> {
        let resolved = self.rank(utterance)?.into_iter().next();
        debug!("classified {utterance:?} as {resolved:?}");
        Ok(resolved)
    }

    /// Ordered label set.
    pub fn labels(&self) -> &[String] {
        self.scorer.labels()
    }

    /// Vocabulary used for encoding.
    pub fn vocabulary(&self) -> &Vocabulary {
        self.encoder.vocabulary()
    }

    /// Confidence threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Name of the underlying scorer.
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }
}
