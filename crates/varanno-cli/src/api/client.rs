//! HTTP client for the VEP lookup endpoint
//!
//! [`VepClient::lookup`] never fails. Every path ends either in a parsed
//! body or in [`RawLookupResult::empty`], with diagnostics logged on the way.
//!
//! Per-response policy:
//!
//! | Response          | Action                                               |
//! |-------------------|------------------------------------------------------|
//! | 2xx               | parse JSON body and return it                        |
//! | 429               | wait `Retry-After` (or the retry delay) and retry    |
//! | 400, 404          | give up immediately                                  |
//! | 5xx               | wait the retry delay and retry                       |
//! | other / transport | wait the retry delay and retry                       |
//!
//! When the attempts run out the result is empty. A 429 on the last attempt
//! is not special-cased: it falls through to the generic path and is
//! treated like any other non-2xx status.

use crate::api::{endpoints, types::RawLookupResult};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::sleep::Sleeper;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use varanno_common::Identifier;

const JSON_MIME: &str = "application/json";

/// How a response status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    RateLimited,
    BadRequest,
    NotFound,
    ServerError,
    /// Any other unsuccessful status; handled like a transport failure
    OtherFailure,
}

impl ResponseClass {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::NOT_FOUND => Self::NotFound,
            s if s.as_u16() >= 500 => Self::ServerError,
            s if s.is_success() => Self::Success,
            _ => Self::OtherFailure,
        }
    }
}

/// Result of a single request
enum Attempt {
    Done(RawLookupResult),
    Retry(Duration),
}

/// Client for `GET <base>/vep/<species>/id/<identifier>`
pub struct VepClient {
    client: Client,
    config: ClientConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl VepClient {
    /// Create a new client
    pub fn new(config: ClientConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            sleeper,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Look up one identifier, retrying according to the configured policy.
    pub async fn lookup(&self, identifier: &Identifier) -> RawLookupResult {
        let url = endpoints::vep_id_url(&self.config.base_url, &self.config.species, identifier.as_str());
        let max_retries = self.config.retry.max_retries;

        if max_retries == 0 {
            warn!(identifier = %identifier, "max_retries is 0, no request sent");
            return RawLookupResult::empty();
        }

        for attempt in 1..=max_retries {
            let is_last = attempt == max_retries;

            match self.attempt(&url, identifier, attempt, is_last).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(delay) => {
                    debug!(
                        identifier = %identifier,
                        attempt = attempt,
                        max_retries = max_retries,
                        delay = ?delay,
                        "Retrying lookup"
                    );
                    self.sleeper.sleep(delay).await;
                },
            }
        }

        RawLookupResult::empty()
    }

    async fn attempt(&self, url: &str, identifier: &Identifier, attempt: u32, is_last: bool) -> Attempt {
        let sent = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => return self.failed(identifier, &e, attempt, is_last),
        };

        let status = response.status();

        match ResponseClass::from_status(status) {
            ResponseClass::RateLimited if !is_last => {
                let delay = retry_after(response.headers()).unwrap_or(self.config.retry.retry_delay);
                warn!(
                    identifier = %identifier,
                    retry_after_secs = delay.as_secs_f64(),
                    "Rate limited, retrying after delay"
                );
                return Attempt::Retry(delay);
            },
            ResponseClass::BadRequest => {
                warn!(identifier = %identifier, "Bad request: the identifier appears to be invalid");
                return Attempt::Done(RawLookupResult::empty());
            },
            ResponseClass::NotFound => {
                warn!(identifier = %identifier, "Not found: identifier does not exist in the database");
                return Attempt::Done(RawLookupResult::empty());
            },
            ResponseClass::ServerError => {
                warn!(
                    identifier = %identifier,
                    status = status.as_u16(),
                    attempt = attempt,
                    max_retries = self.config.retry.max_retries,
                    "Server error"
                );
                return if is_last {
                    Attempt::Done(RawLookupResult::empty())
                } else {
                    Attempt::Retry(self.config.retry.retry_delay)
                };
            },
            _ => {},
        }

        match parse_body(response).await {
            Ok(body) => Attempt::Done(RawLookupResult::from_json(body)),
            Err(e) => self.failed(identifier, &e, attempt, is_last),
        }
    }

    fn failed(&self, identifier: &Identifier, error: &reqwest::Error, attempt: u32, is_last: bool) -> Attempt {
        warn!(
            identifier = %identifier,
            error = %error,
            attempt = attempt,
            max_retries = self.config.retry.max_retries,
            "Error querying annotation service"
        );

        if is_last {
            Attempt::Done(RawLookupResult::empty())
        } else {
            Attempt::Retry(self.config.retry.retry_delay)
        }
    }
}

/// Non-2xx statuses and undecodable bodies both surface as `reqwest::Error`.
async fn parse_body(response: Response) -> reqwest::Result<Value> {
    response.error_for_status()?.json::<Value>().await
}

/// Seconds from a `Retry-After` header, when present and numeric
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs: f64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;

    Duration::try_from_secs_f64(secs).ok()
}
