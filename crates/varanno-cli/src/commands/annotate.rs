//! `varanno` annotation run
//!
//! Reads the identifier list, resolves each identifier in turn, and writes
//! the report once all lookups are done.

use crate::annotation::{extract, Annotation};
use crate::api::VepClient;
use crate::config::{validate_additional_fields, ClientConfig, DEFAULT_PACING_DELAY_MS};
use crate::error::{CliError, Result};
use crate::identifiers::read_identifier_batch;
use crate::progress::{self, RunSummary};
use crate::report::write_report;
use crate::sleep::Sleeper;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Options for one run
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Extra annotation fields to include as columns
    pub additional_fields: Vec<String>,
    /// Overwrite an existing output file
    pub force: bool,
    /// Log each identifier instead of drawing a progress bar
    pub verbose: bool,
    /// Pause after each identifier
    pub pacing_delay: Duration,
}

impl AnnotateOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            additional_fields: Vec::new(),
            force: false,
            verbose: false,
            pacing_delay: Duration::from_millis(DEFAULT_PACING_DELAY_MS),
        }
    }
}

/// Annotate every identifier in `options.input` and write the report.
pub async fn run(
    options: &AnnotateOptions,
    client_config: ClientConfig,
    sleeper: Arc<dyn Sleeper>,
) -> Result<RunSummary> {
    validate_additional_fields(&options.additional_fields)?;

    if options.output.exists() && !options.force {
        return Err(CliError::OutputExists(options.output.clone()));
    }

    let batch = read_identifier_batch(&options.input)?;
    if batch.accepted.is_empty() {
        return Err(CliError::NoIdentifiers(options.input.clone()));
    }

    let client = VepClient::new(client_config, Arc::clone(&sleeper))?;
    let total = batch.accepted.len();

    info!(
        count = total,
        species = %client.config().species,
        server = %client.base_url(),
        "Processing identifiers"
    );

    let pb = if options.verbose {
        ProgressBar::hidden()
    } else {
        progress::create_progress_bar(total as u64)
    };

    let mut annotations: Vec<Annotation> = Vec::with_capacity(total);
    let mut annotated = 0;
    let mut failed = 0;

    for (index, identifier) in batch.accepted.iter().enumerate() {
        if options.verbose {
            info!(identifier = %identifier, position = index + 1, total = total, "Processing");
        } else {
            pb.set_message(identifier.to_string());
        }

        let raw = client.lookup(identifier).await;
        let annotation = extract(&raw, &options.additional_fields);

        if annotation.has_data() {
            annotated += 1;
        } else {
            debug!(identifier = %identifier, "No annotation data");
            failed += 1;
        }
        annotations.push(annotation);
        pb.inc(1);

        sleeper.sleep(options.pacing_delay).await;
    }

    pb.finish_and_clear();

    write_report(&batch.accepted, &annotations, &options.output)?;

    Ok(RunSummary {
        total,
        annotated,
        failed,
        rejected: batch.rejected.len(),
        output: options.output.clone(),
    })
}
