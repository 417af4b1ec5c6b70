//! Configuration for annotation runs
//!
//! Everything the client and the driver need is passed in explicitly; there
//! are no process-wide retry or delay constants beyond the defaults below.

use crate::error::{CliError, Result};
use crate::report::IDENTIFIER_COLUMN;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Defaults
// ============================================================================

/// Public Ensembl REST endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://rest.ensembl.org";

pub const DEFAULT_SPECIES: &str = "human";

/// Attempts per identifier, including the first request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Pause between consecutive identifiers.
pub const DEFAULT_PACING_DELAY_MS: u64 = 100;

/// Per-request timeout. Can be overridden via VARANNO_API_TIMEOUT_SECS.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

pub const SERVER_URL_ENV: &str = "VARANNO_SERVER_URL";
pub const API_TIMEOUT_ENV: &str = "VARANNO_API_TIMEOUT_SECS";

/// How often and how patiently a lookup is retried.
///
/// The delay is constant between attempts; a rate-limited response may
/// replace it with the server's `Retry-After` hint for that one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Settings for [`VepClient`](crate::api::VepClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST service, without trailing slash
    pub base_url: String,

    /// Species segment of the lookup path
    pub species: String,

    pub timeout: Duration,

    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            species: DEFAULT_SPECIES.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Load base URL and timeout from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load base URL and timeout through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(SERVER_URL_ENV).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Self::new(base_url).with_timeout(api_timeout_from(&lookup))
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check the values a user can get wrong
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CliError::config("Server URL cannot be empty"));
        }

        if self.species.trim().is_empty() {
            return Err(CliError::config("Species cannot be empty"));
        }

        Ok(())
    }
}

/// Request timeout from `VARANNO_API_TIMEOUT_SECS`, or the default
pub fn api_timeout_from_env() -> Duration {
    api_timeout_from(|key| std::env::var(key).ok())
}

/// Unparseable values fall back to the default.
pub fn api_timeout_from(lookup: impl Fn(&str) -> Option<String>) -> Duration {
    let secs = lookup(API_TIMEOUT_ENV)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

    Duration::from_secs(secs)
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Validate user-requested extra annotation fields.
pub fn validate_additional_fields(fields: &[String]) -> Result<()> {
    for field in fields {
        if field.trim().is_empty() {
            return Err(CliError::config("Additional field names cannot be empty"));
        }

        if field == IDENTIFIER_COLUMN {
            return Err(CliError::config(format!(
                "'{}' is reserved for the identifier column and cannot be requested as an additional field",
                IDENTIFIER_COLUMN
            )));
        }
    }

    Ok(())
}
