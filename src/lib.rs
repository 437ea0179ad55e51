//! # Haven
//!
//! Message-intent dispatch engine for a conversational mental-health support
//! assistant.
//!
//! Every user utterance is routed through strategies in strict precedence
//! order:
//!
//! 1. an ordered table of safety and command rules (greeting, exercise
//!    confirmation, negative-affect detection, help triage)
//! 2. a statistical intent classifier with a fixed confidence threshold
//! 3. a keyword search over a small FAQ table
//! 4. a generic fallback reply
//!
//! ```
//! use std::sync::Arc;
//! use haven::content::{ContentPack, IntentCatalog, ResponseCatalog};
//! use haven::dispatch::{ConversationState, DispatchEngine, EngineContext};
//!
//! let context = EngineContext::new(
//!     ContentPack::default(),
//!     ResponseCatalog::preloaded(IntentCatalog::default()),
//!     None,
//!     "mindfulness",
//!     None,
//! )
//! .unwrap();
//! let engine = DispatchEngine::new(Arc::new(context));
//!
//! let outcome = engine.handle_turn("start", ConversationState::Idle);
//! assert_eq!(outcome.response, "Hello! How can I help you today?");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod ml;
pub mod session;

pub mod prelude {
    pub use crate::config::{ClassifierSource, EngineConfig};
    pub use crate::content::{ContentPack, IntentCatalog, ResponseCatalog};
    pub use crate::dispatch::{ConversationState, DispatchEngine, EngineContext, Route, TurnOutcome};
    pub use crate::error::{HavenError, Result};
    pub use crate::ml::intent_classifier::{IntentClassifier, IntentScorer, ScoredIntent};
    pub use crate::session::{SessionId, SessionStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
