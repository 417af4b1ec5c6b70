//! Identifier list reader
//!
//! Loads one dbSNP identifier per line. Blank lines are skipped, malformed
//! lines are reported and dropped, and everything else is kept in file
//! order, duplicates included.

use crate::error::{CliError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};
use varanno_common::{Identifier, VarannoError};

/// A non-blank input line that is not a valid identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number
    pub line: usize,
    pub value: String,
    pub reason: String,
}

/// Outcome of reading an identifier list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierBatch {
    pub accepted: Vec<Identifier>,
    pub rejected: Vec<RejectedLine>,
}

/// Read identifiers from `path`.
///
/// Fails only when the file cannot be opened or read.
pub fn read_identifiers(path: impl AsRef<Path>) -> Result<Vec<Identifier>> {
    Ok(read_identifier_batch(path)?.accepted)
}

/// Like [`read_identifiers`], but keeps the rejected lines as well.
pub fn read_identifier_batch(path: impl AsRef<Path>) -> Result<IdentifierBatch> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::input_unreadable(path, e))?;

    parse_identifiers(BufReader::new(file)).map_err(|e| match e {
        CliError::Io(source) => CliError::input_unreadable(path, source),
        other => other,
    })
}

/// Parse identifiers from any line-oriented source
pub fn parse_identifiers<R: BufRead>(reader: R) -> Result<IdentifierBatch> {
    let mut batch = IdentifierBatch::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let value = line.trim();

        if value.is_empty() {
            continue;
        }

        match Identifier::parse(value) {
            Ok(id) => batch.accepted.push(id),
            Err(VarannoError::InvalidIdentifier { value, reason }) => {
                warn!(line = index + 1, identifier = %value, reason = %reason, "Skipping invalid identifier");
                batch.rejected.push(RejectedLine {
                    line: index + 1,
                    value,
                    reason,
                });
            },
        }
    }

    if !batch.rejected.is_empty() {
        warn!(count = batch.rejected.len(), "Found possibly invalid identifiers");
    }

    debug!(accepted = batch.accepted.len(), "Read identifier list");

    Ok(batch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn ids(batch: &IdentifierBatch) -> Vec<&str> {
        batch.accepted.iter().map(Identifier::as_str).collect()
    }

    #[test]
    fn test_skips_blank_lines_and_keeps_order() {
        let batch = parse_identifiers(Cursor::new("rs12345\nrs67890\n\nrs11111")).unwrap();
        assert_eq!(ids(&batch), vec!["rs12345", "rs67890", "rs11111"]);
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn test_trims_whitespace_and_crlf() {
        let batch = parse_identifiers(Cursor::new("  rs1 \r\n\t\r\nrs2\r\n")).unwrap();
        assert_eq!(ids(&batch), vec!["rs1", "rs2"]);
    }

    #[test]
    fn test_rejects_malformed_lines_and_continues() {
        let batch = parse_identifiers(Cursor::new("rs1\nfoo\nrs12x\nrs3\n")).unwrap();
        assert_eq!(ids(&batch), vec!["rs1", "rs3"]);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].line, 2);
        assert_eq!(batch.rejected[0].value, "foo");
        assert_eq!(batch.rejected[1].line, 3);
        assert!(!batch.rejected[1].reason.is_empty());
    }

    #[test]
    fn test_preserves_duplicates() {
        let batch = parse_identifiers(Cursor::new("rs5\nrs5\nrs4\nrs5")).unwrap();
        assert_eq!(ids(&batch), vec!["rs5", "rs5", "rs4", "rs5"]);
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let batch = parse_identifiers(Cursor::new("\n \n")).unwrap();
        assert!(batch.accepted.is_empty());
    }

    #[test]
    fn test_read_identifiers_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "rs12345\nrs67890\n\nrs11111").unwrap();

        let result = read_identifiers(file.path()).unwrap();
        let result: Vec<&str> = result.iter().map(Identifier::as_str).collect();
        assert_eq!(result, vec!["rs12345", "rs67890", "rs11111"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_identifiers(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CliError::InputUnreadable { .. }));
    }

    #[test]
    fn test_non_utf8_input_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'r', b's', 0xff, b'\n']).unwrap();

        let err = read_identifiers(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InputUnreadable { .. }));
    }
}
