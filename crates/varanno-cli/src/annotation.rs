//! Annotation extraction
//!
//! Maps a raw VEP lookup body onto the fixed report schema. Only the first
//! variant record of a response is used; VEP returns one record per input
//! identifier in the common case.

use crate::api::RawLookupResult;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

pub const START: &str = "start";
pub const END: &str = "end";
pub const MOST_SEVERE_CONSEQUENCE: &str = "most_severe_consequence";
pub const GENE_SYMBOLS: &str = "gene_symbols";

/// Standard fields in report order
pub const STANDARD_FIELDS: [&str; 4] = [START, END, MOST_SEVERE_CONSEQUENCE, GENE_SYMBOLS];

const TRANSCRIPT_CONSEQUENCES: &str = "transcript_consequences";
const GENE_SYMBOL: &str = "gene_symbol";

/// Annotation values for one identifier. Missing data is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub start: String,
    pub end: String,
    pub most_severe_consequence: String,
    pub gene_symbols: String,
    /// Caller-requested fields beyond the standard four
    pub extra: BTreeMap<String, String>,
}

impl Annotation {
    /// All-empty annotation with a slot for each requested extra field
    pub fn with_fields(extra_fields: &[String]) -> Self {
        let mut annotation = Self::default();
        for name in extra_fields {
            if !is_standard_field(name) {
                annotation.extra.insert(name.clone(), String::new());
            }
        }
        annotation
    }

    /// Value of a standard or extra field
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            START => Some(&self.start),
            END => Some(&self.end),
            MOST_SEVERE_CONSEQUENCE => Some(&self.most_severe_consequence),
            GENE_SYMBOLS => Some(&self.gene_symbols),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            START => self.start = value,
            END => self.end = value,
            MOST_SEVERE_CONSEQUENCE => self.most_severe_consequence = value,
            GENE_SYMBOLS => self.gene_symbols = value,
            other => {
                self.extra.insert(other.to_string(), value);
            },
        }
    }

    /// Field name/value pairs: standard fields first, then extras sorted
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        STANDARD_FIELDS
            .iter()
            .map(move |name| (*name, self.get(name).unwrap_or_default()))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// True when at least one field carries data
    pub fn has_data(&self) -> bool {
        self.fields().any(|(_, value)| !value.is_empty())
    }
}

pub fn is_standard_field(name: &str) -> bool {
    STANDARD_FIELDS.contains(&name)
}

/// Where an extra field is looked for, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// The variant record itself
    Variant,
    /// Each transcript consequence in turn; the first one with the key wins
    TranscriptConsequences,
}

pub const FIELD_LOOKUP_ORDER: [FieldSource; 2] =
    [FieldSource::Variant, FieldSource::TranscriptConsequences];

impl FieldSource {
    fn find<'a>(self, variant: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
        match self {
            FieldSource::Variant => variant.get(name),
            FieldSource::TranscriptConsequences => transcript_consequences(variant)
                .find_map(|consequence| consequence.get(name)),
        }
    }
}

/// Build the annotation for one lookup result.
pub fn extract(raw: &RawLookupResult, extra_fields: &[String]) -> Annotation {
    let mut annotation = Annotation::with_fields(extra_fields);

    let Some(variant) = raw.first_variant() else {
        return annotation;
    };

    annotation.start = field_or_empty(variant.get(START));
    annotation.end = field_or_empty(variant.get(END));
    annotation.most_severe_consequence = field_or_empty(variant.get(MOST_SEVERE_CONSEQUENCE));
    annotation.gene_symbols = gene_symbols(variant);

    for name in extra_fields {
        let found = FIELD_LOOKUP_ORDER
            .iter()
            .find_map(|source| source.find(variant, name));

        if let Some(value) = found {
            annotation.set(name, value_to_field(value));
        }
    }

    annotation
}

/// Distinct transcript gene symbols, sorted and comma-joined, falling back to
/// the variant's own `gene_symbol`.
fn gene_symbols(variant: &Map<String, Value>) -> String {
    let symbols: BTreeSet<String> = transcript_consequences(variant)
        .filter_map(|consequence| consequence.get(GENE_SYMBOL))
        .map(value_to_field)
        .filter(|symbol| !symbol.is_empty())
        .collect();

    if !symbols.is_empty() {
        return symbols.into_iter().collect::<Vec<_>>().join(",");
    }

    field_or_empty(variant.get(GENE_SYMBOL))
}

fn transcript_consequences(variant: &Map<String, Value>) -> impl Iterator<Item = &Map<String, Value>> {
    variant
        .get(TRANSCRIPT_CONSEQUENCES)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn field_or_empty(value: Option<&Value>) -> String {
    value.map(value_to_field).unwrap_or_default()
}

/// Render a JSON value as a report cell.
///
/// Strings are taken verbatim, `null` becomes empty, everything else uses
/// its compact JSON form.
pub fn value_to_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
