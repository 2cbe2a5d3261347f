//! Core error types.

use thiserror::Error;

/// Errors raised while validating configuration or decoding events.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The configured default language is not a usable tag.
    #[error("Invalid language tag {0:?}: expected 1-35 ASCII letters, digits, '-' or '_'")]
    InvalidLanguage(String),

    /// An event name outside the dashboard vocabulary.
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    /// A recorded event line that could not be decoded.
    #[error("Malformed event on line {line}: {reason}")]
    MalformedEvent { line: usize, reason: String },
}
