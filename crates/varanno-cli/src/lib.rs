//! varanno CLI Library
//!
//! Annotates dbSNP identifiers (`rs<digits>`) with the Ensembl Variant
//! Effect Predictor REST service and writes a TSV report.
//!
//! # Pipeline
//!
//! - [`identifiers`]: read and validate the identifier list
//! - [`api`]: one lookup per identifier, with retry and rate-limit handling
//! - [`annotation`]: flatten a lookup body into the report schema
//! - [`report`]: write the TSV
//! - [`commands::annotate`]: drive the above and collect a summary

pub mod annotation;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod progress;
pub mod report;
pub mod sleep;

// Re-export commonly used types
pub use annotation::{extract, Annotation};
pub use error::{CliError, Result};

use crate::commands::annotate::AnnotateOptions;
use crate::config::{
    api_timeout_from_env, ClientConfig, RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_PACING_DELAY_MS,
    DEFAULT_RETRY_DELAY_SECS, DEFAULT_SERVER_URL, DEFAULT_SPECIES,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// varanno - annotate dbSNP identifiers using the Ensembl VEP API
#[derive(Parser, Debug)]
#[command(name = "varanno")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file containing dbSNP identifiers (one per line)
    #[arg(short, long, required_unless_present = "markdown_help")]
    pub input: Option<PathBuf>,

    /// Output TSV file for annotations
    #[arg(short, long, required_unless_present = "markdown_help")]
    pub output: Option<PathBuf>,

    /// Species name for the variants
    #[arg(short, long, default_value = DEFAULT_SPECIES)]
    pub species: String,

    /// Additional field to include in the output (repeatable)
    #[arg(short = 'a', long = "additional-field", visible_alias = "additional-fields")]
    pub additional_fields: Vec<String>,

    /// Verbose output with per-identifier progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum number of attempts per identifier
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// VEP REST server URL
    #[arg(long, env = "VARANNO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Seconds to wait between retry attempts
    #[arg(long, env = "VARANNO_RETRY_DELAY_SECS", default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub retry_delay_secs: u64,

    /// Milliseconds to pause between identifiers
    #[arg(long, env = "VARANNO_PACING_DELAY_MS", default_value_t = DEFAULT_PACING_DELAY_MS)]
    pub pacing_delay_ms: u64,

    /// Print the CLI reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

impl Cli {
    /// Client settings from flags, with the request timeout from the environment
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server_url.clone())
            .with_species(self.species.clone())
            .with_timeout(api_timeout_from_env())
            .with_retry(RetryPolicy {
                max_retries: self.max_retries,
                retry_delay: Duration::from_secs(self.retry_delay_secs),
            })
    }

    pub fn annotate_options(&self) -> Result<AnnotateOptions> {
        let (Some(input), Some(output)) = (&self.input, &self.output) else {
            return Err(CliError::config("Both --input and --output are required"));
        };

        Ok(AnnotateOptions {
            input: input.clone(),
            output: output.clone(),
            additional_fields: self.additional_fields.clone(),
            force: self.force,
            verbose: self.verbose,
            pacing_delay: Duration::from_millis(self.pacing_delay_ms),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["varanno", "-i", "ids.txt", "-o", "out.tsv"]).unwrap();
        assert_eq!(cli.species, "human");
        assert_eq!(cli.max_retries, 3);
        assert!(!cli.force);
        assert!(cli.additional_fields.is_empty());

        let options = cli.annotate_options().unwrap();
        assert_eq!(options.input, PathBuf::from("ids.txt"));
        assert_eq!(options.pacing_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_cli_repeated_fields_and_retry_policy() {
        let cli = Cli::try_parse_from([
            "varanno", "-i", "in", "-o", "out", "-a", "impact", "--additional-fields", "strand",
            "-r", "5", "--retry-delay-secs", "0", "-s", "mouse", "--server-url", "http://x/",
        ])
        .unwrap();

        assert_eq!(cli.additional_fields, vec!["impact", "strand"]);

        let config = cli.client_config();
        assert_eq!(config.base_url, "http://x");
        assert_eq!(config.species, "mouse");
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.retry_delay, Duration::ZERO);
    }

    #[test]
    fn test_cli_requires_input_and_output() {
        assert!(Cli::try_parse_from(["varanno", "-i", "in"]).is_err());
        assert!(Cli::try_parse_from(["varanno", "-o", "out"]).is_err());
    }

    #[test]
    fn test_markdown_help_needs_no_paths() {
        let cli = Cli::try_parse_from(["varanno", "--markdown-help"]).unwrap();
        assert!(cli.markdown_help);
        assert!(cli.input.is_none());
        assert!(matches!(cli.annotate_options(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_markdown_reference_lists_flags() {
        let markdown = clap_markdown::help_markdown::<Cli>();
        assert!(markdown.contains("--additional-field"));
        assert!(markdown.contains("--max-retries"));
    }
}
