//! Lookup response types
//!
//! The service body is kept as untyped JSON; only the extractor decides
//! which parts of it matter.

use serde_json::{Map, Value};

/// Body of one VEP lookup, or nothing when the lookup failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLookupResult {
    body: Option<Value>,
}

impl RawLookupResult {
    /// The "not found / failed" result
    pub fn empty() -> Self {
        Self { body: None }
    }

    /// Wrap a parsed response body
    pub fn from_json(body: Value) -> Self {
        Self { body: Some(body) }
    }

    /// True when no body was obtained
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    pub fn as_json(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The first variant record, when the body is a non-empty array whose
    /// first element is an object.
    pub fn first_variant(&self) -> Option<&Map<String, Value>> {
        self.body
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .and_then(Value::as_object)
    }
}

impl From<Value> for RawLookupResult {
    fn from(body: Value) -> Self {
        Self::from_json(body)
    }
}
