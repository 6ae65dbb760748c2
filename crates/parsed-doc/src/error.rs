//! Error type shared by the annotation layer.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while building or annotating a parsed document.
pub enum DocumentError {
    #[error("language error: {0}")]
    /// Loading the front-end language failed.
    Language(String),

    #[error("the parser produced no syntax tree")]
    /// The front end returned no tree (e.g. parsing was interrupted).
    Parse,

    #[error("operation cancelled")]
    /// The caller's cancellation token fired during a walk.
    Cancelled,

    #[error("invalid configuration: {0}")]
    /// A configuration document could not be decoded.
    Config(#[from] serde_json::Error),
}
