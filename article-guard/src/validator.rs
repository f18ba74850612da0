//! Field-level validation of a single article record.
//!
//! [`FieldValidator::validate`] runs four independent checks in a fixed order
//! (title, content, url, published date). Every check always runs, so a
//! failing record reports all of its violations at once; the reason code is
//! taken from the first one.
//!
//! # Examples
//!
//! ```rust
//! use article_guard::record::Record;
//! use article_guard::reason::ReasonCode;
//! use article_guard::validator::FieldValidator;
//!
//! let record = Record::new()
//!     .with("title", "")
//!     .with("content", "x".repeat(150))
//!     .with("url", "http://a.com")
//!     .with("published_date", "2024-01-01");
//!
//! let outcome = FieldValidator::new().validate(&record);
//! assert!(!outcome.passed());
//! assert_eq!(outcome.reason(), Some(ReasonCode::MissingTitle));
//! assert_eq!(outcome.message(), Some("Title is missing or empty."));
//! ```

use crate::limits::{MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH, MIN_CONTENT_LENGTH, URL_PREVIEW_LENGTH};
use crate::reason::{ReasonClassifier, ReasonCode};
use crate::record::{self, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)^https?://.+").expect("Hard-coded regex pattern should be valid")
});

/// A single rule violation found on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingTitle,
    TitleTooLong { length: usize },
    MissingContent,
    ContentTooShort { length: usize },
    ContentTooLong { length: usize },
    MissingUrl,
    /// The URL does not begin with `http://` or `https://`.
    UrlBadScheme { preview: String },
    /// The scheme is right but nothing follows it.
    UrlInvalidFormat,
    MissingPublished,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingTitle => write!(f, "Title is missing or empty."),
            Violation::TitleTooLong { length } => write!(
                f,
                "Title is too long: {length} characters (maximum {MAX_TITLE_LENGTH})."
            ),
            Violation::MissingContent => write!(f, "Content is missing or empty."),
            Violation::ContentTooShort { length } => write!(
                f,
                "Content is too short: {length} characters (minimum {MIN_CONTENT_LENGTH} required)."
            ),
            Violation::ContentTooLong { length } => write!(
                f,
                "Content is too long: {length} characters (maximum {MAX_CONTENT_LENGTH})."
            ),
            Violation::MissingUrl => write!(f, "URL is missing or empty."),
            Violation::UrlBadScheme { preview } => write!(
                f,
                "URL must start with http:// or https:// (got: {preview})."
            ),
            Violation::UrlInvalidFormat => write!(
                f,
                "URL has invalid format after scheme (expected a host/path)."
            ),
            Violation::MissingPublished => write!(f, "Published date is missing or empty."),
        }
    }
}

/// The verdict for one record.
///
/// `passed`, `reason` and `message` always agree: a passing outcome has
/// neither reason nor message, a failing one has both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    passed: bool,
    reason: Option<ReasonCode>,
    message: Option<String>,
    #[serde(skip)]
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
            message: None,
            violations: Vec::new(),
        }
    }

    fn from_violations(violations: Vec<Violation>, classifier: &ReasonClassifier) -> Self {
        let Some(first) = violations.first() else {
            return Self::pass();
        };
        let reason = classifier.classify(first);
        let message = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            passed: false,
            reason: Some(reason),
            message: Some(message),
            violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Reason code derived from the first violation.
    pub fn reason(&self) -> Option<ReasonCode> {
        self.reason
    }

    /// All violation messages, space-joined in check order.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Validates records against the article field rules.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    classifier: ReasonClassifier,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that maps violations through a custom classifier.
    pub fn with_classifier(classifier: ReasonClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ReasonClassifier {
        &self.classifier
    }

    /// Validates one record. Never fails: unusable field values count as empty.
    pub fn validate(&self, record: &Record) -> ValidationOutcome {
        let violations: Vec<Violation> = [
            check_title(record),
            check_content(record),
            check_url(record),
            check_published(record),
        ]
        .into_iter()
        .flatten()
        .collect();

        ValidationOutcome::from_violations(violations, &self.classifier)
    }
}

fn check_title(record: &Record) -> Option<Violation> {
    let title = record.text(record::TITLE);
    let length = title.chars().count();
    if length == 0 {
        Some(Violation::MissingTitle)
    } else if length > MAX_TITLE_LENGTH {
        Some(Violation::TitleTooLong { length })
    } else {
        None
    }
}

fn check_content(record: &Record) -> Option<Violation> {
    let content = record.text(record::CONTENT);
    let length = content.chars().count();
    if length == 0 {
        Some(Violation::MissingContent)
    } else if length < MIN_CONTENT_LENGTH {
        Some(Violation::ContentTooShort { length })
    } else if length > MAX_CONTENT_LENGTH {
        Some(Violation::ContentTooLong { length })
    } else {
        None
    }
}

fn check_url(record: &Record) -> Option<Violation> {
    let url = record.text(record::URL);
    if url.is_empty() {
        return Some(Violation::MissingUrl);
    }
    if !has_http_scheme(&url) {
        return Some(Violation::UrlBadScheme {
            preview: url_preview(&url),
        });
    }
    if !URL_SHAPE.is_match(&url) {
        return Some(Violation::UrlInvalidFormat);
    }
    None
}

fn check_published(record: &Record) -> Option<Violation> {
    // Only an absent, null or zero-length `published_date` defers to `published`.
    let field = match record.get(record::PUBLISHED_DATE) {
        None | Some(Value::Null) => record::PUBLISHED,
        Some(Value::String(s)) if s.is_empty() => record::PUBLISHED,
        Some(_) => record::PUBLISHED_DATE,
    };
    record.is_missing(field).then_some(Violation::MissingPublished)
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn url_preview(url: &str) -> String {
    let mut preview: String = url.chars().take(URL_PREVIEW_LENGTH).collect();
    if url.chars().count() > URL_PREVIEW_LENGTH {
        preview.push_str("...");
    }
    preview
}
