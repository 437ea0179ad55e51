//! Command line argument parsing for the Haven CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dispatch::ConversationState;

/// Haven - a message-intent dispatch engine for a support assistant
#[derive(Parser, Debug, Clone)]
#[command(name = "haven")]
#[command(about = "Route chat messages through safety rules, an intent classifier and an FAQ")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HavenArgs {
    /// Log more; -vv adds info logs and turn details, -vvv debug logs
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; wins over -v
    #[arg(short, long)]
    pub quiet: bool,

    /// How results are printed
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HAVEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Intents file, overriding the configuration
    #[arg(long, value_name = "INTENTS_FILE")]
    pub intents: Option<PathBuf>,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl HavenArgs {
    /// 0 when quiet, otherwise the -v count with a floor of 1.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat interactively, one utterance per line
    Chat(ChatArgs),

    /// Handle a single turn
    Turn(TurnArgs),

    /// Show classifier scores for an utterance
    Classify(ClassifyArgs),

    /// Load configuration and content, then report what was loaded
    Check,
}

/// Arguments for the interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Prompt printed before each line
    #[arg(long, default_value = "> ")]
    pub prompt: String,

    /// Send "start" before reading input
    #[arg(long)]
    pub greet: bool,
}

/// Arguments for a single turn
#[derive(Parser, Debug, Clone)]
pub struct TurnArgs {
    /// The utterance
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,

    /// Conversational state before the turn (idle, awaiting-exercise-confirmation)
    #[arg(short, long, default_value = "idle")]
    pub state: ConversationState,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// The utterance
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,
}

/// Result rendering
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    Human,
    /// One JSON document per result
    Json,
}
