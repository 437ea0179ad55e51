//! Statistical components of the dispatch pipeline.
//!
//! The engine consumes a pre-built scoring model through the
//! [`intent_classifier::IntentScorer`] trait; nothing in this crate trains one.

pub mod intent_classifier;

pub use intent_classifier::*;
