//! Error types for Haven.
//!
//! Errors surface while loading configuration, content and classifier
//! artifacts, and from the building blocks the engine is made of. A turn
//! never fails: the engine turns every per-turn failure into a reply text.
//!
//! ```
//! use haven::error::{HavenError, Result};
//!
//! fn load_threshold(raw: &str) -> Result<f64> {
//!     raw.parse()
//!         .map_err(|_| HavenError::config(format!("not a number: {raw}")))
//! }
//!
//! assert!(load_threshold("0.25").is_ok());
//! assert_eq!(
//!     load_threshold("high").unwrap_err().to_string(),
//!     "Configuration error: not a number: high"
//! );
//! ```

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HavenError {
    /// Reading content files, artifacts or configuration failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed classifier artifact or scorer output.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Invalid intents, FAQ or exercise content.
    #[error("Content error: {0}")]
    Content(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    /// A value given on the command line or in a file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HavenError>;

impl HavenError {
    pub fn classifier<S: Into<String>>(msg: S) -> Self {
        HavenError::Classifier(msg.into())
    }

    pub fn content<S: Into<String>>(msg: S) -> Self {
        HavenError::Content(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        HavenError::Config(msg.into())
    }

    pub fn session<S: Into<String>>(msg: S) -> Self {
        HavenError::Session(msg.into())
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        HavenError::Parse(msg.into())
    }

    /// Whether the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HavenError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
