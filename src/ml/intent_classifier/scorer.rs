//! Intent scorer trait definition.

use crate::error::Result;

/// An opaque, pre-built scoring function over feature vectors.
///
/// Implementations return one score per label, parallel to [`labels`](Self::labels).
/// The statistical backend can be swapped without touching the dispatch logic.
pub trait IntentScorer: Send + Sync {
    /// Ordered label vocabulary.
    fn labels(&self) -> &[String];

    /// Score a feature vector. The output must have `labels().len()` entries.
    fn score(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Get the name of this scorer for debugging and logging.
    fn name(&self) -> &str;
}
