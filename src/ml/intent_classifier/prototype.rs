//! Nearest-prototype scorer built from intent example patterns.

use std::collections::HashMap;

use super::encoder::{FeatureEncoder, Vocabulary};
use super::scorer::IntentScorer;
use super::types::IntentSample;
use crate::analysis::TextNormalizer;
use crate::error::{HavenError, Result};

/// Scores each label by the average cosine similarity between the utterance
/// vector and the label's example vectors.
#[derive(Debug, Clone)]
pub struct PrototypeScorer {
    /// Labels in first-seen sample order.
    labels: Vec<String>,
    /// Example vectors, parallel to `labels`.
    prototypes: Vec<Vec<Vec<f64>>>,
}

impl PrototypeScorer {
    /// Build a scorer and its vocabulary from example utterances.
    pub fn from_samples(
        samples: &[IntentSample],
        normalizer: &TextNormalizer,
    ) -> Result<(Vocabulary, Self)> {
        if samples.is_empty() {
            return Err(HavenError::classifier("Intent samples cannot be empty"));
        }

        let tokenized: Vec<Vec<String>> = samples
            .iter()
            .map(|sample| normalizer.normalize(&sample.text))
            .collect::<Result<_>>()?;

        let vocabulary = Vocabulary::from_token_sequences(&tokenized);
        let encoder = FeatureEncoder::new(std::sync::Arc::new(vocabulary.clone()));

        let mut labels: Vec<String> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut prototypes: Vec<Vec<Vec<f64>>> = Vec::new();
        for (sample, tokens) in samples.iter().zip(&tokenized) {
            let slot = *positions.entry(sample.intent.as_str()).or_insert_with(|| {
                labels.push(sample.intent.clone());
                prototypes.push(Vec::new());
                labels.len() - 1
            });
            prototypes[slot].push(encoder.encode(tokens));
        }

        Ok((vocabulary, Self { labels, prototypes }))
    }

    /// Calculate cosine similarity between two vectors.
    fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            0.0
        } else {
            dot_product / (magnitude_a * magnitude_b)
        }
    }
}

impl IntentScorer for PrototypeScorer {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn score(&self, features: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .prototypes
            .iter()
            .map(|examples| {
                let total: f64 = examples
                    .iter()
                    .map(|example| Self::cosine_similarity(features, example))
                    .sum();
                total / examples.len() as f64
            })
            .collect())
    }

    fn name(&self) -> &str {
        "prototype"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<IntentSample> {
        vec![
            IntentSample::new("hello", "greeting"),
            IntentSample::new("hi there", "greeting"),
            IntentSample::new("how do I sleep better", "sleep_advice"),
            IntentSample::new("I cannot sleep at night", "sleep_advice"),
            IntentSample::new("goodbye", "farewell"),
        ]
    }

    #[test]
    fn test_labels_in_first_seen_order() {
        let normalizer = TextNormalizer::new();
        let (_, scorer) = PrototypeScorer::from_samples(&samples(), &normalizer).unwrap();
        assert_eq!(scorer.labels(), &["greeting", "sleep_advice", "farewell"]);
    }

    #[test]
    fn test_prototype_scores() {
        let normalizer = TextNormalizer::new();
        let (vocabulary, scorer) = PrototypeScorer::from_samples(&samples(), &normalizer).unwrap();
        let encoder = FeatureEncoder::new(std::sync::Arc::new(vocabulary));

        let tokens = normalizer.normalize("goodbye").unwrap();
        let scores = scorer.score(&encoder.encode(&tokens)).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores[2] - 1.0).abs() < 1e-9);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_unknown_words_score_zero() {
        let normalizer = TextNormalizer::new();
        let (vocabulary, scorer) = PrototypeScorer::from_samples(&samples(), &normalizer).unwrap();
        let encoder = FeatureEncoder::new(std::sync::Arc::new(vocabulary));

        let scores = scorer.score(&encoder.encode(&["qwerty"])).unwrap();
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_samples_rejected() {
        let normalizer = TextNormalizer::new();
        assert!(PrototypeScorer::from_samples(&[], &normalizer).is_err());
    }
}
