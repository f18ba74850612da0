//! Normalization, completeness filtering and deduplication of raw records.
//!
//! These transforms run before validation. They never fail: values that
//! cannot be cleaned or parsed become empty strings or nulls and are left for
//! the validator to report.

use crate::logging::truncate_field;
use crate::record::{self, has_column, text_of, Record};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Fields that receive text cleaning when present in a batch.
pub const TEXT_FIELDS: [&str; 5] = [record::TITLE, record::CONTENT, "author", "source", record::URL];

/// Fields a record must carry to survive [`drop_incomplete`].
pub const REQUIRED_FIELDS: [&str; 3] = [record::TITLE, record::CONTENT, record::URL];

/// Output layout of standardized dates.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\s+").expect("Hard-coded regex pattern should be valid")
});

const DATETIME_LAYOUTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%z"];

const DATE_LAYOUTS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
];

/// Cleans one text value.
///
/// Decodes HTML entities, collapses whitespace runs to a single space and
/// trims. Null, NaN, arrays and objects clean to `""`.
pub fn clean_text(value: &Value) -> String {
    let text = text_of(value);
    if text.is_empty() {
        return text;
    }
    let decoded = html_escape::decode_html_entities(&text);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Parses a date in any supported layout and renders it as
/// `YYYY-MM-DDTHH:MM:SSZ` in UTC.
///
/// Returns `None` for empty or placeholder values (`none`, `null`, `nan`) and
/// for anything no layout accepts.
pub fn parse_iso_date(value: &Value) -> Option<String> {
    let text = text_of(value);
    if text.is_empty() || ["none", "null", "nan"].contains(&text.to_lowercase().as_str()) {
        return None;
    }
    parse_datetime(&text).map(|dt| dt.format(ISO_FORMAT).to_string())
}

/// Parses a date string into a UTC timestamp. Naive values are taken as UTC.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(text, layout).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Some(naive.and_utc());
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// What [`normalize_batch`] did to a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationSummary {
    /// Text fields that were cleaned.
    pub text_fields: Vec<String>,
    /// Whether the batch has a published date column after aliasing.
    pub has_date_column: bool,
    /// Dates that parsed to ISO form.
    pub dates_parsed: usize,
    /// Non-empty dates that could not be parsed and were nulled.
    pub dates_invalid: usize,
}

/// Cleans text fields and standardizes published dates across a batch.
///
/// When only the legacy `published` column exists it is copied into
/// `published_date` first.
pub fn normalize_batch(mut records: Vec<Record>) -> (Vec<Record>, NormalizationSummary) {
    let mut summary = NormalizationSummary::default();

    if has_column(&records, record::PUBLISHED) && !has_column(&records, record::PUBLISHED_DATE) {
        for r in &mut records {
            let published = r.get(record::PUBLISHED).cloned().unwrap_or(Value::Null);
            r.insert(record::PUBLISHED_DATE, published);
        }
    }

    summary.text_fields = TEXT_FIELDS
        .iter()
        .filter(|field| has_column(&records, field))
        .map(|field| field.to_string())
        .collect();
    for r in &mut records {
        for field in &summary.text_fields {
            let cleaned = r.get(field).map(clean_text).unwrap_or_default();
            r.insert(field.as_str(), cleaned);
        }
    }

    summary.has_date_column = has_column(&records, record::PUBLISHED_DATE);
    if summary.has_date_column {
        for r in &mut records {
            let raw = r.get(record::PUBLISHED_DATE).cloned().unwrap_or(Value::Null);
            match parse_iso_date(&raw) {
                Some(iso) => {
                    summary.dates_parsed += 1;
                    r.insert(record::PUBLISHED_DATE, iso);
                }
                None => {
                    if !record::is_empty(&raw) {
                        summary.dates_invalid += 1;
                        debug!(
                            value = %truncate_field(&raw.to_string(), 80),
                            "unparsable published date"
                        );
                    }
                    r.insert(record::PUBLISHED_DATE, Value::Null);
                }
            }
        }
    }

    (records, summary)
}

/// Removes records missing a title, content or url.
///
/// A required field that no record in the batch carries is not enforced.
pub fn drop_incomplete(records: Vec<Record>) -> Vec<Record> {
    let enforced: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| has_column(&records, field))
        .collect();
    records
        .into_iter()
        .filter(|r| enforced.iter().all(|field| !r.is_missing(field)))
        .collect()
}

/// Removes records whose cleaned (title, url) pair was already seen.
///
/// The first occurrence is kept. Batches without both columns are returned
/// unchanged.
pub fn deduplicate(records: Vec<Record>) -> Vec<Record> {
    if !has_column(&records, record::TITLE) || !has_column(&records, record::URL) {
        return records;
    }
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let key = (
                r.get(record::TITLE).map(clean_text).unwrap_or_default(),
                r.get(record::URL).map(clean_text).unwrap_or_default(),
            );
            seen.insert(key)
        })
        .collect()
}
