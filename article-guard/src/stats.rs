//! Aggregated validation statistics.

use crate::error::{GuardError, Result};
use crate::reason::ReasonCode;
use crate::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Frequency table of reason codes that remembers first-seen order.
///
/// Ties in [`ReasonTally::most_common`] resolve to the code that was counted
/// first, which makes the failure distribution deterministic for a given
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonTally {
    counts: IndexMap<ReasonCode, usize>,
}

impl ReasonTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `code`.
    pub fn increment(&mut self, code: ReasonCode) {
        *self.counts.entry(code).or_insert(0) += 1;
    }

    /// Returns the count for `code` (zero if never seen).
    pub fn get(&self, code: ReasonCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct codes seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Codes with counts, most frequent first, ties by first-seen order.
    pub fn most_common(&self) -> Vec<(ReasonCode, usize)> {
        let mut entries: Vec<(usize, ReasonCode, usize)> = self
            .counts
            .iter()
            .enumerate()
            .map(|(seen, (code, count))| (seen, *code, *count))
            .collect();
        entries.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        entries
            .into_iter()
            .map(|(_, code, count)| (code, count))
            .collect()
    }

    /// The single most frequent code, or `None` when nothing failed.
    pub fn top(&self) -> Option<(ReasonCode, usize)> {
        self.most_common().into_iter().next()
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (ReasonCode, usize)> + '_ {
        self.counts.iter().map(|(code, count)| (*code, *count))
    }
}

/// Everything known about one failed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Position of the record in the validated batch.
    pub index: usize,
    pub reason: ReasonCode,
    /// All violation messages for the record.
    pub message: String,
    /// Copy of the record as it was validated.
    pub row: Record,
}

/// Counts and failure details for one validated batch.
///
/// `total == passed + failed`, the tally sums to `failed`, and there is one
/// detail per failed record in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStatistics {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failure_reasons: ReasonTally,
    pub failed_record_details: Vec<FailureDetail>,
}

impl ValidationStatistics {
    /// Creates empty statistics for a batch of `total` records.
    pub fn with_total(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Passed records as a percentage of the batch, `0.0` for an empty batch.
    pub fn pass_rate(&self) -> f64 {
        percentage(self.passed, self.total)
    }

    /// Indices of the failed records, ascending.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failed_record_details.iter().map(|d| d.index).collect()
    }

    /// Returns the records that passed, in input order.
    ///
    /// `records` must be the batch these statistics were computed from.
    pub fn partition_valid(&self, records: &[Record]) -> Vec<Record> {
        let mut failed = self.failed_record_details.iter().map(|d| d.index).peekable();
        records
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                if failed.peek() == Some(index) {
                    failed.next();
                    false
                } else {
                    true
                }
            })
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Renders the statistics as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GuardError::Internal(format!("Failed to serialize statistics to JSON: {e}"))
        })
    }
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
