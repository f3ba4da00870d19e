//! Parse error types.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is not a valid document.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// The source is too large to be addressed by 32-bit offsets.
    #[error("Source too large: {0} bytes")]
    TooLarge(usize),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource(message.into())
    }
}
