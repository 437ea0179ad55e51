//! Message-intent dispatch.
//!
//! One utterance goes in, exactly one response and the next conversational
//! state come out. Strategies are consulted in a fixed order:
//!
//! ```text
//! utterance ─→ rule table ─(no match)─→ classifier ─(no intent)─→ FAQ ─(no match)─→ fallback
//!                  │                        │                       │
//!                reply                 response variant           answer
//! ```

pub mod engine;
pub mod faq;
pub mod mood;
pub mod response;
pub mod rules;
pub mod state;

pub use engine::{DispatchEngine, EngineContext, Route, TurnOutcome};
pub use faq::FaqMatcher;
pub use mood::Mood;
pub use response::ResponseResolver;
pub use rules::{Predicate, Rule, RuleAction, RuleSet};
pub use state::ConversationState;
