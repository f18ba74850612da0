//! JSON file input and output for record batches.

use crate::error::{ErrorContext, GuardError, Result};
use crate::record::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Key under which wrapped exports keep their article list.
pub const ARTICLES_KEY: &str = "articles";

/// Loads a batch of records from a JSON file.
///
/// Accepted shapes:
/// - `null` → no records
/// - an array of objects → one record per object
/// - `{"articles": [...]}` → the wrapped array
/// - any other object → a single record
///
/// A non-object element inside an array is rejected as invalid input.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parse_records(&text)
        .with_context(|| format!("Failed to load records from {}", path.display()))?;
    info!(records = records.len(), "loaded records");
    Ok(records)
}

/// Parses a batch of records from JSON text. See [`load_records`].
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let data: Value = serde_json::from_str(text)?;
    match data {
        Value::Array(items) => records_from_array(items),
        Value::Object(mut map) => match map.remove(ARTICLES_KEY) {
            Some(Value::Array(items)) => records_from_array(items),
            Some(other) => {
                map.insert(ARTICLES_KEY.to_string(), other);
                Ok(vec![Record::from(map)])
            }
            None => Ok(vec![Record::from(map)]),
        },
        _ => Ok(Vec::new()),
    }
}

fn records_from_array(items: Vec<Value>) -> Result<Vec<Record>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record::from(map)),
            other => Err(GuardError::invalid_input(format!(
                "element {index} is not an object (found {})",
                value_kind(&other)
            ))),
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Writes records as a pretty-printed JSON array, creating parent directories.
#[instrument(skip_all, fields(path = %path.as_ref().display(), records = records.len()))]
pub fn save_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    write_text(path, &json)
}

/// Writes text to a file, creating parent directories.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
