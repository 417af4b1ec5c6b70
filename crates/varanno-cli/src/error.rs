//! Error types for the varanno CLI
//!
//! Only fatal conditions live here. A single identifier failing to resolve
//! is not an error at this level; it degrades to an empty annotation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Fatal, user-facing errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Identifier list could not be opened or read
    #[error("Cannot read input file '{}': {source}. Verify the path exists and you have read permissions.", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report destination already exists and overwriting was not requested
    #[error("Output file '{}' already exists. Use --force to overwrite it.", .0.display())]
    OutputExists(PathBuf),

    /// Nothing left to annotate after validation
    #[error("No valid identifiers found in '{}'. Identifiers must look like 'rs12345', one per line.", .0.display())]
    NoIdentifiers(PathBuf),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your command-line flags and environment variables.")]
    Config(String),

    /// Report rows could not be assembled
    #[error("Report error: {0}")]
    Report(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Delimited output could not be written
    #[error("Failed to write report: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Create an input error for `path`
    pub fn input_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }
}
