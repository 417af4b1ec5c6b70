//! varanno CLI - Main entry point

use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::error;
use varanno_cli::commands::annotate;
use varanno_cli::sleep::TokioSleeper;
use varanno_cli::Cli;
use varanno_common::logging::{init_logging, LogConfig, LogLevel};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Verbose: debug to stderr. Otherwise warnings and errors only.
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .log_file_prefix("varanno")
        .build();

    let log_config = match log_config.clone().merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring invalid logging environment: {}", e);
            log_config
        },
    };

    // CLI should work without logging
    let guard = init_logging(&log_config).ok();

    let client_config = cli.client_config();
    let result = match cli.annotate_options() {
        Ok(options) => {
            println!("Processing identifiers from {}...", options.input.display());
            annotate::run(&options, client_config, Arc::new(TokioSleeper)).await
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => println!("{}", summary.render()),
        Err(e) => {
            error!(error = %e, "Annotation run failed");
            eprintln!("Error: {}", e);
            drop(guard);
            process::exit(1);
        },
    }
}
