//! Codec error types

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding wire payloads
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input was well-formed JSON but not an accepted shape
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// The underlying JSON backend failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Helper to create an invalid format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Classify a serde_json error raised while decoding.
    ///
    /// Data errors (valid JSON, wrong shape) become `InvalidFormat`; syntax,
    /// EOF and IO errors stay as `Json`.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::invalid_format(err.to_string()),
            _ => Self::Json(err),
        }
    }

    /// Check if this is an invalid format error
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}
