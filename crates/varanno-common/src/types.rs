//! Shared domain types

use crate::error::{Result, VarannoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Required prefix of a dbSNP reference SNP identifier
pub const RSID_PREFIX: &str = "rs";

/// A syntactically valid dbSNP reference SNP identifier (`rs<digits>`).
///
/// Only the shape is checked here; whether the variant exists is decided by
/// the annotation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Parse an identifier, trimming surrounding whitespace first.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();

        let Some(digits) = value.strip_prefix(RSID_PREFIX) else {
            return Err(VarannoError::invalid_identifier(
                value,
                format!("must start with '{}'", RSID_PREFIX),
            ));
        };

        if digits.is_empty() {
            return Err(VarannoError::invalid_identifier(
                value,
                format!("expected digits after '{}'", RSID_PREFIX),
            ));
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VarannoError::invalid_identifier(
                value,
                format!("only decimal digits may follow '{}'", RSID_PREFIX),
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// The identifier text, e.g. `rs429358`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = VarannoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = VarannoError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Identifier::parse("rs12345").unwrap().as_str(), "rs12345");
        assert_eq!(Identifier::parse("\trs7412  ").unwrap().as_str(), "rs7412");
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        let err = Identifier::parse("chr1:12345").unwrap_err();
        assert!(err.to_string().contains("must start with 'rs'"));
        assert!(Identifier::parse("RS12345").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_digits() {
        let err = Identifier::parse("rs").unwrap_err();
        assert!(err.to_string().contains("expected digits"));
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(Identifier::parse("rs123a").is_err());
        assert!(Identifier::parse("rs 123").is_err());
        assert!(Identifier::parse("rs-1").is_err());
        assert!(Identifier::parse("rs１２").is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let id = Identifier::parse("rs429358").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rs429358\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<Identifier>("\"abc\"").is_err());
    }
}
