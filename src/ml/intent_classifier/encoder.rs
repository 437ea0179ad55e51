//! Vocabulary and bag-of-presence feature encoding.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{HavenError, Result};

/// Ordered set of known tokens; a token's index is its feature coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Create a vocabulary from an ordered token list.
    ///
    /// Duplicate tokens are rejected: every token owns exactly one coordinate.
    pub fn new(tokens: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), idx).is_some() {
                return Err(HavenError::classifier(format!(
                    "Duplicate vocabulary token: {token}"
                )));
            }
        }

        Ok(Self { tokens, index })
    }

    /// Build a vocabulary from token sequences, in first-seen order.
    pub fn from_token_sequences<'a, I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let mut tokens = Vec::new();
        let mut index = HashMap::new();
        for sequence in sequences {
            for token in sequence {
                if !index.contains_key(token) {
                    index.insert(token.clone(), tokens.len());
                    tokens.push(token.clone());
                }
            }
        }

        Self { tokens, index }
    }

    /// Coordinate of a token, if known.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Ordered tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Feature-vector dimensionality.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Maps a normalized token sequence to a presence vector over a vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    vocabulary: Arc<Vocabulary>,
}

impl FeatureEncoder {
    /// Create an encoder for the given vocabulary.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Encode tokens as a binary presence vector of length `vocabulary.len()`.
    ///
    /// Repeated tokens count once; unknown tokens are ignored.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(idx) = self.vocabulary.index_of(token.as_ref()) {
                features[idx] = 1.0;
            }
        }
        features
    }

    /// Get the vocabulary.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Width of the produced vectors.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(tokens: &[&str]) -> FeatureEncoder {
        let vocabulary = Vocabulary::new(tokens.iter().map(|t| t.to_string()).collect()).unwrap();
        FeatureEncoder::new(Arc::new(vocabulary))
    }

    #[test]
    fn test_presence_not_frequency() {
        let encoder = encoder(&["hello", "help", "stress"]);
        let features = encoder.encode(&["help", "help", "stress"]);
        assert_eq!(features, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_out_of_vocabulary_is_all_zero() {
        let encoder = encoder(&["hello", "help"]);
        let features = encoder.encode(&["asdkjasdlkj", "zzz"]);
        assert_eq!(features.len(), 2);
        assert!(features.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_tokens() {
        let encoder = encoder(&["hello"]);
        let tokens: Vec<String> = Vec::new();
        assert_eq!(encoder.encode(&tokens), vec![0.0]);
    }

    #[test]
    fn test_duplicate_vocabulary_rejected() {
        let result = Vocabulary::new(vec!["a".to_string(), "a".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_token_sequences_first_seen_order() {
        let sequences = vec![
            vec!["hi".to_string(), "there".to_string()],
            vec!["there".to_string(), "friend".to_string()],
        ];
        let vocabulary = Vocabulary::from_token_sequences(&sequences);
        assert_eq!(vocabulary.tokens(), &["hi", "there", "friend"]);
        assert_eq!(vocabulary.index_of("friend"), Some(2));
    }
}
