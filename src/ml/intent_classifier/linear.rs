//! Dense linear scorer loaded from a JSON classifier artifact.
//!
//! The artifact carries everything the engine needs for inference: the
//! vocabulary, the ordered label set, one weight row per label and a bias
//! vector. Scores are `activation(W · x + b)`.
//!
//! ```json
//! {
//!   "vocabulary": ["hello", "hi", "stress"],
//!   "labels": ["greeting", "stress_advice"],
//!   "weights": [[2.0, 2.0, 0.0], [0.0, 0.0, 3.0]],
//!   "bias": [0.0, 0.0],
//!   "activation": "softmax"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::encoder::Vocabulary;
use super::scorer::IntentScorer;
use crate::error::{HavenError, Result};

/// Output activation applied to the linear layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Normalized probabilities over all labels.
    #[default]
    Softmax,
    /// Independent per-label probabilities.
    Sigmoid,
    /// Raw linear scores.
    Identity,
}

/// Serialized classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Ordered vocabulary; index = feature coordinate.
    pub vocabulary: Vec<String>,
    /// Ordered label set; index = output coordinate.
    pub labels: Vec<String>,
    /// `labels.len()` rows of `vocabulary.len()` weights.
    pub weights: Vec<Vec<f64>>,
    /// One bias per label.
    pub bias: Vec<f64>,
    /// Output activation.
    #[serde(default)]
    pub activation: Activation,
}

impl ClassifierArtifact {
    /// Load an artifact from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let artifact: ClassifierArtifact = serde_json::from_str(&content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check that all dimensions agree.
    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(HavenError::classifier("Artifact has no labels"));
        }
        if self.weights.len() != self.labels.len() {
            return Err(HavenError::classifier(format!(
                "Expected {} weight rows, found {}",
                self.labels.len(),
                self.weights.len()
            )));
        }
        if self.bias.len() != self.labels.len() {
            return Err(HavenError::classifier(format!(
                "Expected {} bias values, found {}",
                self.labels.len(),
                self.bias.len()
            )));
        }
        if let Some((row, weights)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| w.len() != self.vocabulary.len())
        {
            return Err(HavenError::classifier(format!(
                "Weight row {row} has {} entries, vocabulary has {}",
                weights.len(),
                self.vocabulary.len()
            )));
        }
        Ok(())
    }

    /// Split the artifact into its vocabulary and scorer.
    pub fn into_parts(self) -> Result<(Vocabulary, LinearScorer)> {
        self.validate()?;
        let vocabulary = Vocabulary::new(self.vocabulary)?;
        let scorer = LinearScorer {
            labels: self.labels,
            weights: self.weights,
            bias: self.bias,
            activation: self.activation,
        };
        Ok((vocabulary, scorer))
    }
}

/// Inference-only dense layer with an output activation.
#[derive(Debug, Clone)]
pub struct LinearScorer {
    labels: Vec<String>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    activation: Activation,
}

impl LinearScorer {
    fn softmax(logits: &mut [f64]) {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut sum = 0.0;
        for value in logits.iter_mut() {
            *value = (*value - max).exp();
            sum += *value;
        }
        if sum > 0.0 {
            for value in logits.iter_mut() {
                *value /= sum;
            }
        }
    }

    /// Input width expected by this scorer.
    pub fn input_width(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }
}

impl IntentScorer for LinearScorer {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn score(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.input_width() {
            return Err(HavenError::classifier(format!(
                "Feature vector has {} entries, scorer expects {}",
                features.len(),
                self.input_width()
            )));
        }

        let mut logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + bias)
            .collect();

        match self.activation {
            Activation::Softmax => Self::softmax(&mut logits),
            Activation::Sigmoid => {
                for value in logits.iter_mut() {
                    *value = 1.0 / (1.0 + (-*value).exp());
                }
            }
            Activation::Identity => {}
        }

        Ok(logits)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
