//! Error types shared across varanno crates

use thiserror::Error;

/// Result type alias for shared varanno operations
pub type Result<T> = std::result::Result<T, VarannoError>;

/// Domain errors that are not tied to a particular binary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VarannoError {
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },
}

impl VarannoError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
