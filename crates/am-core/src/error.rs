//! Shared error type.
//!
//! Sub-crates define their own error enums; `AmError` covers the failures
//! that can happen before any of them get involved (bad configuration, bad
//! input text, file access).

use thiserror::Error;

/// The top-level error type for `am-core`.
#[derive(Debug, Error)]
pub enum AmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `am-core`.
pub type AmResult<T> = Result<T, AmError>;
