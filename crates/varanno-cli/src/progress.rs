//! Console presentation: progress bar and run summary
//!
//! The progress bar draws on stderr and hides itself when stderr is not a
//! terminal; the summary goes to stdout.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Create the per-identifier progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Counts collected over one annotation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub annotated: usize,
    pub failed: usize,
    /// Input lines dropped by validation
    pub rejected: usize,
    pub output: PathBuf,
}

impl RunSummary {
    /// Share of identifiers that produced no data, `None` for an empty run
    pub fn failure_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.failed as f64 / self.total as f64)
    }

    /// Human-readable summary block
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "Results Summary:".bold());
        let _ = writeln!(out, "  Total identifiers: {}", self.total);
        let _ = writeln!(out, "  Successfully annotated: {}", self.annotated.to_string().green());
        let _ = writeln!(out, "  Failed to annotate: {}", self.failed.to_string().red());

        if self.failed > 0 {
            if let Some(rate) = self.failure_rate() {
                let _ = writeln!(out, "  Failure rate: {}", format_percent(rate));
            }
        }

        if self.rejected > 0 {
            let _ = writeln!(out, "  Invalid input lines skipped: {}", self.rejected.to_string().yellow());
        }

        let _ = write!(
            out,
            "\n{} Annotations saved to {}",
            "✓".green(),
            self.output.display()
        );
        out
    }
}

/// Format a fraction as a percentage with one decimal
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
