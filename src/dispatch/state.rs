//! Per-session conversational state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HavenError;

/// Cross-turn context of one conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationState {
    /// Nothing pending.
    #[default]
    Idle,
    /// An exercise was offered; the next "yes" or "no" answers it.
    AwaitingExerciseConfirmation,
}

impl ConversationState {
    /// Kebab-case name, as used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingExerciseConfirmation => "awaiting-exercise-confirmation",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationState {
    type Err = HavenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idle" => Ok(ConversationState::Idle),
            "awaiting-exercise-confirmation" | "awaiting" => {
                Ok(ConversationState::AwaitingExerciseConfirmation)
            }
            other => Err(HavenError::parse(format!(
                "Unknown conversation state: {other}"
            ))),
        }
    }
}
