//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use varanno_cli::config::{ClientConfig, RetryPolicy};
use varanno_cli::sleep::Sleeper;

/// Records requested delays instead of waiting
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

/// Client config for a mock server with a short timeout
pub fn mock_config(uri: &str, max_retries: u32) -> ClientConfig {
    ClientConfig::new(uri)
        .with_timeout(Duration::from_secs(5))
        .with_retry(RetryPolicy {
            max_retries,
            retry_delay: Duration::from_secs(2),
        })
}

/// A VEP-style body for one variant
pub fn vep_body(start: u64, consequence: &str, genes: &[&str]) -> serde_json::Value {
    let consequences: Vec<_> = genes
        .iter()
        .map(|gene| json!({"gene_symbol": gene, "impact": "MODERATE"}))
        .collect();

    json!([{
        "id": format!("rs{}", start),
        "start": start,
        "end": start,
        "most_severe_consequence": consequence,
        "transcript_consequences": consequences
    }])
}
