//! Error types for the handoff library.
//!
//! All fallible operations return [`HandoffError`]. The classifier itself is a
//! total function and never produces one; errors come from configuration
//! loading, the analysis pipeline set-up, and the collaborators used by the
//! support desk (message store, event relay, responder).
//!
//! # Examples
//!
//! ```
//! use handoff::error::{HandoffError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HandoffError::invalid_argument("session id must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for handoff operations.
#[derive(Error, Debug)]
pub enum HandoffError {
    /// I/O errors (config files, transcript files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (invalid patterns, tokenizer set-up)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Rejected configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rejected call arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Message store failures
    #[error("Store error: {0}")]
    Store(String),

    /// Event relay failures
    #[error("Relay error: {0}")]
    Relay(String),

    /// Hosted model failures
    #[error("Responder error: {0}")]
    Responder(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HandoffError.
pub type Result<T> = std::result::Result<T, HandoffError>;

impl HandoffError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HandoffError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HandoffError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HandoffError::InvalidArgument(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        HandoffError::Store(msg.into())
    }

    /// Create a new relay error.
    pub fn relay<S: Into<String>>(msg: S) -> Self {
        HandoffError::Relay(msg.into())
    }

    /// Create a new responder error.
    pub fn responder<S: Into<String>>(msg: S) -> Self {
        HandoffError::Responder(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HandoffError::Other(msg.into())
    }

    /// Whether this error came from one of the desk's collaborators.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            HandoffError::Store(_) | HandoffError::Relay(_) | HandoffError::Responder(_)
        )
    }
}
