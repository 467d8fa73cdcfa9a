//! Error types for the fireclient.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Query parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejection of a dispatch sentence.
///
/// Unknown verbs and malformed token shapes surface here as typed values
/// so callers can branch on them instead of inferring failure from an
/// empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown verb '{0}'")]
    UnknownVerb(String),

    #[error("expected '{expected}', found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("incomplete sentence: missing {0}")]
    Incomplete(&'static str),

    #[error("'{0}' requires a payload")]
    MissingPayload(&'static str),
}
