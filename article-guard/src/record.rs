//! Article records and the value helpers every stage relies on.
//!
//! A [`Record`] is a loosely typed mapping from field name to JSON value. Only
//! four fields carry meaning for validation ([`TITLE`], [`CONTENT`], [`URL`] and
//! the published date under [`PUBLISHED_DATE`] or its legacy alias
//! [`PUBLISHED`]); every other field is passed through untouched.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TITLE: &str = "title";
pub const CONTENT: &str = "content";
pub const URL: &str = "url";
pub const PUBLISHED_DATE: &str = "published_date";
pub const PUBLISHED: &str = "published";

/// One scraped article.
///
/// Field order is preserved from the input so saved output and report
/// sections list fields the way they arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field, if the record carries it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true if the record carries the field at all (even as null).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, keeping its original position when it already exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`Record::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the trimmed text form of a field, or `""` when absent.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(text_of).unwrap_or_default()
    }

    /// Returns true if the field is absent or holds an empty value.
    pub fn is_missing(&self, field: &str) -> bool {
        self.get(field).map_or(true, is_empty)
    }

    /// Iterates over field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<serde_json::Map<String, Value>> for Record {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Returns true for null, NaN, and any value whose text form is blank.
///
/// Arrays and objects are judged by their serialized form, so `[]` and `{}`
/// count as present.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.as_f64().is_some_and(f64::is_nan),
        Value::String(s) => s.trim().is_empty(),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Converts a value to trimmed text, falling back to `""` for values without
/// a meaningful scalar form (null, NaN, arrays, objects).
pub fn text_of(value: &Value) -> String {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        Value::Number(n) if n.as_f64().is_some_and(f64::is_nan) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.trim().to_string(),
    }
}

/// Returns the union of field names across a batch, in first-seen order.
pub fn columns(records: &[Record]) -> Vec<String> {
    let mut seen = IndexSet::new();
    for record in records {
        for key in record.keys() {
            if !seen.contains(key) {
                seen.insert(key.to_string());
            }
        }
    }
    seen.into_iter().collect()
}

/// Returns true if at least one record in the batch carries the field.
pub fn has_column(records: &[Record], field: &str) -> bool {
    records.iter().any(|r| r.contains(field))
}
