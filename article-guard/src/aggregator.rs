//! Batch validation: runs the field validator over a whole collection.

use crate::reason::ReasonCode;
use crate::record::Record;
use crate::stats::{FailureDetail, ValidationStatistics};
use crate::validator::FieldValidator;
use tracing::{debug, info, instrument};

/// Validates a batch of records and accumulates [`ValidationStatistics`].
///
/// # Examples
///
/// ```rust
/// use article_guard::aggregator::BatchValidator;
/// use article_guard::record::Record;
///
/// let records = vec![
///     Record::new().with("title", "T"),
///     Record::new()
///         .with("title", "T")
///         .with("content", "x".repeat(150))
///         .with("url", "https://example.com/a")
///         .with("published_date", "2024-01-01"),
/// ];
///
/// let stats = BatchValidator::new().aggregate(&records);
/// assert_eq!(stats.total, 2);
/// assert_eq!(stats.passed, 1);
/// assert_eq!(stats.failed_record_details[0].index, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchValidator {
    validator: FieldValidator,
}

impl BatchValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: FieldValidator) -> Self {
        Self { validator }
    }

    /// Validates every record in input order.
    ///
    /// The per-record failure details are returned inside the statistics, in
    /// [`ValidationStatistics::failed_record_details`], one entry per failed
    /// record in input order. Each detail keeps the record's position in
    /// `records`, so callers can use them to select the passing records
    /// afterwards.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn aggregate(&self, records: &[Record]) -> ValidationStatistics {
        let mut stats = ValidationStatistics::with_total(records.len());

        for (index, record) in records.iter().enumerate() {
            let outcome = self.validator.validate(record);
            if outcome.passed() {
                stats.passed += 1;
                continue;
            }

            stats.failed += 1;
            let reason = outcome.reason().unwrap_or(ReasonCode::ValidationFailed);
            stats.failure_reasons.increment(reason);
            let message = outcome
                .message()
                .map_or_else(|| reason.label().to_string(), str::to_string);
            debug!(index, reason = %reason, "record failed validation");
            stats.failed_record_details.push(FailureDetail {
                index,
                reason,
                message,
                row: record.clone(),
            });
        }

        info!(
            total = stats.total,
            passed = stats.passed,
            failed = stats.failed,
            "batch validation complete"
        );
        stats
    }
}
