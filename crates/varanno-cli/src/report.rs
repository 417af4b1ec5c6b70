//! TSV report writer

use crate::annotation::{Annotation, STANDARD_FIELDS};
use crate::error::{CliError, Result};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use varanno_common::Identifier;

/// Name of the first report column
pub const IDENTIFIER_COLUMN: &str = "identifier";

/// Column order: identifier, the standard fields, then every extra field
/// seen in any annotation, sorted. An extra named `identifier` never gets a
/// column of its own.
pub fn report_columns(annotations: &[Annotation]) -> Vec<String> {
    let extras: BTreeSet<&str> = annotations
        .iter()
        .flat_map(|annotation| annotation.extra.keys().map(String::as_str))
        .filter(|name| *name != IDENTIFIER_COLUMN)
        .collect();

    std::iter::once(IDENTIFIER_COLUMN)
        .chain(STANDARD_FIELDS)
        .chain(extras)
        .map(str::to_string)
        .collect()
}

/// Write one row per identifier/annotation pair to `path`.
pub fn write_report(
    identifiers: &[Identifier],
    annotations: &[Annotation],
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report_to(identifiers, annotations, file)?;

    debug!(path = %path.display(), rows = identifiers.len(), "Report written");
    Ok(())
}

/// Write the report to any writer
pub fn write_report_to<W: Write>(
    identifiers: &[Identifier],
    annotations: &[Annotation],
    writer: W,
) -> Result<()> {
    if identifiers.len() != annotations.len() {
        return Err(CliError::report(format!(
            "{} identifiers but {} annotations",
            identifiers.len(),
            annotations.len()
        )));
    }

    let columns = report_columns(annotations);

    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    tsv.write_record(&columns)?;

    for (identifier, annotation) in identifiers.iter().zip(annotations) {
        let row = columns.iter().map(|column| {
            if column == IDENTIFIER_COLUMN {
                identifier.as_str()
            } else {
                annotation.get(column).unwrap_or_default()
            }
        });
        tsv.write_record(row)?;
    }

    tsv.flush()?;
    Ok(())
}
