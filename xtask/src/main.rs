//! Build automation tasks for varanno
//!
//! - `generate-cli-docs`: render the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for varanno", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &Path) -> anyhow::Result<()> {
    let markdown = clap_markdown::help_markdown::<varanno_cli::Cli>();
    let content = render_reference(&markdown, &chrono::Utc::now().format("%Y-%m-%d").to_string());

    fs::create_dir_all(output_dir)?;
    let file_path = output_dir.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());
    Ok(())
}

fn render_reference(markdown: &str, date: &str) -> String {
    format!(
        r#"# varanno CLI Reference

Generated from the CLI source code on {date}. To update, run
`cargo run -p xtask -- generate-cli-docs`.

`varanno` annotates dbSNP identifiers (`rs<digits>`, one per line) with the
Ensembl VEP REST API and writes a tab-separated report with the columns
`identifier`, `start`, `end`, `most_severe_consequence`, `gene_symbols` and
any requested additional fields.

## Quick Start

```bash
varanno --input rsids.txt --output annotations.tsv
varanno -i rsids.txt -o annotations.tsv -a impact -a biotype --force
```

## Usage

{markdown}

## Environment Variables

- `VARANNO_SERVER_URL` - VEP REST base URL (default: `https://rest.ensembl.org`)
- `VARANNO_API_TIMEOUT_SECS` - per-request timeout in seconds (default: `30`)
- `VARANNO_RETRY_DELAY_SECS` - delay between retry attempts (default: `2`)
- `VARANNO_PACING_DELAY_MS` - pause between identifiers (default: `100`)
- `VARANNO_LOG_LEVEL`, `VARANNO_LOG_OUTPUT`, `VARANNO_LOG_FORMAT`,
  `VARANNO_LOG_DIR`, `VARANNO_LOG_FILTER` - diagnostics on stderr or file
"#
    )
}
