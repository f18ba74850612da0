//! Reason codes and the classifier that derives them from violations.
//!
//! A failing record is grouped under exactly one [`ReasonCode`], taken from its
//! first violation. The mapping is an ordered table of predicates; the first
//! predicate that matches wins and an unmatched violation falls back to
//! [`ReasonCode::ValidationFailed`].

use crate::limits::{MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH, MIN_CONTENT_LENGTH};
use crate::validator::Violation;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable machine-readable identifier for a validation failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    MissingTitle,
    TitleTooLong,
    MissingContent,
    ShortContent,
    ContentTooLong,
    MissingUrl,
    InvalidUrl,
    MissingPublished,
    /// Catch-all for violations no rule claims.
    ValidationFailed,
}

static LABELS: Lazy<IndexMap<ReasonCode, String>> = Lazy::new(|| {
    ReasonCode::ALL
        .iter()
        .map(|code| (*code, code.render_label()))
        .collect()
});

impl ReasonCode {
    /// Every code, in classification priority order.
    pub const ALL: [ReasonCode; 9] = [
        ReasonCode::MissingTitle,
        ReasonCode::TitleTooLong,
        ReasonCode::MissingContent,
        ReasonCode::ShortContent,
        ReasonCode::ContentTooLong,
        ReasonCode::MissingUrl,
        ReasonCode::InvalidUrl,
        ReasonCode::MissingPublished,
        ReasonCode::ValidationFailed,
    ];

    /// Returns the stable identifier of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MissingTitle => "missing_title",
            ReasonCode::TitleTooLong => "title_too_long",
            ReasonCode::MissingContent => "missing_content",
            ReasonCode::ShortContent => "short_content",
            ReasonCode::ContentTooLong => "content_too_long",
            ReasonCode::MissingUrl => "missing_url",
            ReasonCode::InvalidUrl => "invalid_url",
            ReasonCode::MissingPublished => "missing_published",
            ReasonCode::ValidationFailed => "validation_failed",
        }
    }

    /// Returns the human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        LABELS.get(self).map_or("", String::as_str)
    }

    fn render_label(&self) -> String {
        match self {
            ReasonCode::MissingTitle => "Title is missing or empty.".to_string(),
            ReasonCode::TitleTooLong => {
                format!("Title exceeds maximum length ({MAX_TITLE_LENGTH} characters).")
            }
            ReasonCode::MissingContent => "Content is missing or empty.".to_string(),
            ReasonCode::ShortContent => {
                format!("Content is too short (minimum {MIN_CONTENT_LENGTH} characters).")
            }
            ReasonCode::ContentTooLong => {
                format!("Content exceeds maximum length ({MAX_CONTENT_LENGTH} characters).")
            }
            ReasonCode::MissingUrl => "URL is missing or empty.".to_string(),
            ReasonCode::InvalidUrl => {
                "URL must start with http:// or https:// and have valid format.".to_string()
            }
            ReasonCode::MissingPublished => "Published date is missing or empty.".to_string(),
            ReasonCode::ValidationFailed => "Validation failed.".to_string(),
        }
    }

    /// Classifies a rendered violation message by substring.
    ///
    /// Kept for reading messages produced outside the validator, such as
    /// reports written by earlier runs. Fresh outcomes go through
    /// [`ReasonClassifier::classify`] instead.
    pub fn from_message(text: &str) -> Self {
        const MARKERS: [(&[&str], ReasonCode); 8] = [
            (&["Title is missing"], ReasonCode::MissingTitle),
            (&["Title is too long"], ReasonCode::TitleTooLong),
            (&["Content is missing"], ReasonCode::MissingContent),
            (&["Content is too short"], ReasonCode::ShortContent),
            (&["Content is too long"], ReasonCode::ContentTooLong),
            (&["URL is missing"], ReasonCode::MissingUrl),
            (
                &["URL must start with", "URL has invalid format"],
                ReasonCode::InvalidUrl,
            ),
            (&["Published date is missing"], ReasonCode::MissingPublished),
        ];

        MARKERS
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
            .map_or(ReasonCode::ValidationFailed, |(_, code)| *code)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A predicate over a violation, paired with the code it selects.
pub type ReasonRule = (fn(&Violation) -> bool, ReasonCode);

/// Ordered violation-to-reason mapping.
#[derive(Clone)]
pub struct ReasonClassifier {
    rules: Vec<ReasonRule>,
}

fn rule(matches: fn(&Violation) -> bool, code: ReasonCode) -> ReasonRule {
    (matches, code)
}

impl Default for ReasonClassifier {
    fn default() -> Self {
        Self {
            rules: vec![
                rule(|v| matches!(v, Violation::MissingTitle), ReasonCode::MissingTitle),
                rule(|v| matches!(v, Violation::TitleTooLong { .. }), ReasonCode::TitleTooLong),
                rule(|v| matches!(v, Violation::MissingContent), ReasonCode::MissingContent),
                rule(|v| matches!(v, Violation::ContentTooShort { .. }), ReasonCode::ShortContent),
                rule(|v| matches!(v, Violation::ContentTooLong { .. }), ReasonCode::ContentTooLong),
                rule(|v| matches!(v, Violation::MissingUrl), ReasonCode::MissingUrl),
                rule(
                    |v| matches!(v, Violation::UrlBadScheme { .. } | Violation::UrlInvalidFormat),
                    ReasonCode::InvalidUrl,
                ),
                rule(|v| matches!(v, Violation::MissingPublished), ReasonCode::MissingPublished),
            ],
        }
    }
}

impl fmt::Debug for ReasonClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReasonClassifier")
            .field("codes", &self.rules.iter().map(|(_, code)| *code).collect::<Vec<_>>())
            .finish()
    }
}

impl ReasonClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier from an explicit rule table.
    pub fn from_rules(rules: Vec<ReasonRule>) -> Self {
        Self { rules }
    }

    /// Returns the code of the first rule matching the violation.
    pub fn classify(&self, violation: &Violation) -> ReasonCode {
        self.rules
            .iter()
            .find(|(matches, _)| matches(violation))
            .map_or(ReasonCode::ValidationFailed, |(_, code)| *code)
    }
}
