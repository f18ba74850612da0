//! Plain-text quality reports for a pipeline run.
//!
//! [`QualityReport`] renders the full report: processing counts, field
//! completeness, validation results, failure distribution, date coverage,
//! duplicates, optional failure details and a derived metrics summary.
//! [`ValidationSummary`] renders the shorter validator-only view.
//!
//! Rendering is pure: everything shown comes from the arguments, so the same
//! inputs always produce the same text.
//!
//! # Examples
//!
//! ```rust
//! use article_guard::aggregator::BatchValidator;
//! use article_guard::report::{PipelineCounts, QualityReport};
//!
//! let stats = BatchValidator::new().aggregate(&[]);
//! let text = QualityReport::new()
//!     .render(&stats, &PipelineCounts::default(), &[])
//!     .unwrap();
//! assert!(text.contains("Pass rate:                 0.0%"));
//! assert!(text.ends_with("End of report"));
//! ```

use crate::clean::parse_datetime;
use crate::error::Result;
use crate::record::{self, columns, has_column, text_of, Record};
use crate::stats::{percentage, FailureDetail, ValidationStatistics};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const SUMMARY_RULE_WIDTH: usize = 50;

/// Record counts observed by the caller before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCounts {
    /// Records read from the input.
    pub loaded: usize,
    /// Records left after dropping incomplete entries and duplicates.
    pub cleaned: usize,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
}

impl PipelineCounts {
    pub fn dropped(&self) -> usize {
        self.dropped_incomplete + self.dropped_duplicates
    }
}

/// Configuration options for rendering reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Include one entry per failed record
    pub include_failed_details: bool,
    /// Maximum number of failed records to list (-1 for all)
    pub max_failed_details: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_failed_details: true,
            max_failed_details: -1,
        }
    }
}

impl ReportConfig {
    /// Creates a configuration without per-record details.
    pub fn summary_only() -> Self {
        Self {
            include_failed_details: false,
            max_failed_details: 0,
        }
    }

    /// Sets whether to list failed records.
    pub fn with_failed_details(mut self, include: bool) -> Self {
        self.include_failed_details = include;
        self
    }

    /// Sets the maximum number of failed records to list.
    pub fn with_max_failed_details(mut self, max: i32) -> Self {
        self.max_failed_details = max;
        self
    }

    fn details_to_show<'a>(&self, details: &'a [FailureDetail]) -> &'a [FailureDetail] {
        if !self.include_failed_details {
            &[]
        } else if self.max_failed_details < 0 {
            details
        } else {
            let max = self.max_failed_details as usize;
            &details[..std::cmp::min(max, details.len())]
        }
    }
}

/// Renders the full quality report.
#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    config: ReportConfig,
}

impl QualityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Renders the report for one run.
    ///
    /// `cleaned` is the batch that was validated; completeness and date
    /// coverage are computed over it.
    pub fn render(
        &self,
        stats: &ValidationStatistics,
        counts: &PipelineCounts,
        cleaned: &[Record],
    ) -> Result<String> {
        let mut out = String::new();
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(out, "QUALITY REPORT")?;
        writeln!(out, "{heavy}")?;
        writeln!(out)?;

        writeln!(out, "REQUIREMENTS CHECKLIST")?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "  [1] Data Cleaning: whitespace/HTML removal, text encoding, ISO dates, special chars"
        )?;
        writeln!(
            out,
            "  [2] Data Validation: required fields (title, content, url), URL format, content length, reasons"
        )?;
        writeln!(
            out,
            "  [3] Quality Report: total processed, valid vs invalid, completeness %, common failures"
        )?;
        writeln!(out)?;

        writeln!(out, "1. RECORD PROCESSING STATISTICS")?;
        writeln!(out, "{light}")?;
        writeln!(out, "  Total records processed:   {}", counts.loaded)?;
        writeln!(out, "  Cleaned record count:      {}", counts.cleaned)?;
        writeln!(out, "  Deleted record count:      {}", counts.dropped())?;
        writeln!(out, "    - Missing (incomplete):  {}", counts.dropped_incomplete)?;
        writeln!(out, "    - Duplicates:            {}", counts.dropped_duplicates)?;
        writeln!(out)?;

        writeln!(out, "2. FIELD COMPLETENESS (non-null ratio %)")?;
        writeln!(out, "{light}")?;
        write_completeness(&mut out, cleaned)?;
        writeln!(out)?;

        let pass_rate = stats.pass_rate();
        writeln!(out, "3. VALIDATION RESULT STATISTICS")?;
        writeln!(out, "{light}")?;
        writeln!(out, "  Total validation passed:   {}", stats.passed)?;
        writeln!(out, "  Total validation failed:   {}", stats.failed)?;
        writeln!(out, "  Pass rate:                 {pass_rate:.1}%")?;
        writeln!(out)?;

        writeln!(out, "4. VALIDATION FAILURE DISTRIBUTION")?;
        writeln!(out, "{light}")?;
        write_distribution(&mut out, stats)?;
        writeln!(out)?;

        writeln!(out, "5. DATE COVERAGE RANGE (publication date)")?;
        writeln!(out, "{light}")?;
        write_date_coverage(&mut out, cleaned)?;
        writeln!(out)?;

        writeln!(out, "6. DUPLICATE RECORD STATISTICS")?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "  Original duplicate count:  {} (before dedup)",
            counts.dropped_duplicates
        )?;
        writeln!(out, "  Deleted duplicate count:   {}", counts.dropped_duplicates)?;
        writeln!(out)?;

        let details = self.config.details_to_show(&stats.failed_record_details);
        if !details.is_empty() {
            writeln!(out, "FAILED RECORD DETAILS")?;
            writeln!(out, "{light}")?;
            write_details(&mut out, details, stats.failed_record_details.len())?;
        }

        writeln!(out, "INSIGHTFUL METRICS SUMMARY")?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "  End-to-end retention:  {:.1}% ({}/{} records saved)",
            percentage(stats.passed, counts.loaded),
            stats.passed,
            counts.loaded
        )?;
        writeln!(
            out,
            "  Cleaning retention:    {:.1}% ({}/{} after cleaning)",
            percentage(counts.cleaned, counts.loaded),
            counts.cleaned,
            counts.loaded
        )?;
        writeln!(out, "  Validation pass rate: {pass_rate:.1}% (on cleaned set)")?;
        if let Some((code, count)) = stats.failure_reasons.top() {
            writeln!(out, "  Top failure reason:     {} (n={count})", code.label())?;
        }
        writeln!(out)?;

        writeln!(out, "DOCUMENTED PROCESS")?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "  This report is generated by the data cleaning and validation pipeline."
        )?;
        writeln!(
            out,
            "  For AI-assisted development process and historical metrics, see prompt-log.md."
        )?;
        writeln!(out)?;
        writeln!(out, "{heavy}")?;
        write!(out, "End of report")?;

        Ok(out)
    }
}

/// Renders the validator-only summary.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    config: ReportConfig,
}

impl ValidationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, stats: &ValidationStatistics) -> Result<String> {
        let mut out = String::new();
        let heavy = "=".repeat(SUMMARY_RULE_WIDTH);
        let light = "-".repeat(SUMMARY_RULE_WIDTH);

        writeln!(out, "Validation Report")?;
        writeln!(out, "{heavy}")?;
        writeln!(out, "Total records:  {}", stats.total)?;
        writeln!(out, "Passed:        {}", stats.passed)?;
        writeln!(out, "Failed:        {}", stats.failed)?;
        writeln!(out)?;
        writeln!(out, "Failure reason distribution:")?;
        writeln!(out, "{light}")?;
        write_distribution(&mut out, stats)?;
        writeln!(out)?;

        let details = self.config.details_to_show(&stats.failed_record_details);
        if !details.is_empty() {
            writeln!(out, "Failed record details:")?;
            writeln!(out, "{light}")?;
            write_details(&mut out, details, stats.failed_record_details.len())?;
        }

        Ok(out.trim_end_matches('\n').to_string())
    }
}

/// Renders the quality report with the default configuration, listing
/// failed records only when `include_failed_details` is set.
pub fn render_quality_report(
    stats: &ValidationStatistics,
    counts: &PipelineCounts,
    cleaned: &[Record],
    include_failed_details: bool,
) -> Result<String> {
    QualityReport::with_config(ReportConfig::default().with_failed_details(include_failed_details))
        .render(stats, counts, cleaned)
}

fn write_completeness(out: &mut String, cleaned: &[Record]) -> Result<()> {
    let n = cleaned.len();
    for column in columns(cleaned) {
        let non_empty = cleaned.iter().filter(|r| !r.is_missing(&column)).count();
        let pct = percentage(non_empty, n);
        writeln!(out, "  {column:<25} {pct:6.1}%  ({non_empty}/{n})")?;
    }
    Ok(())
}

fn write_distribution(out: &mut String, stats: &ValidationStatistics) -> Result<()> {
    if stats.failure_reasons.is_empty() {
        writeln!(out, "  (none)")?;
        return Ok(());
    }
    for (code, count) in stats.failure_reasons.most_common() {
        writeln!(out, "  {count:4}  {}", code.label())?;
    }
    Ok(())
}

fn write_date_coverage(out: &mut String, cleaned: &[Record]) -> Result<()> {
    let column = if has_column(cleaned, record::PUBLISHED_DATE) {
        record::PUBLISHED_DATE
    } else if has_column(cleaned, record::PUBLISHED) {
        record::PUBLISHED
    } else {
        writeln!(out, "  No date column present.")?;
        return Ok(());
    };

    let dates: Vec<_> = cleaned
        .iter()
        .filter_map(|r| r.get(column))
        .map(text_of)
        .filter(|text| !text.is_empty())
        .filter_map(|text| parse_datetime(&text))
        .collect();

    match (dates.iter().min(), dates.iter().max()) {
        (Some(earliest), Some(latest)) => {
            writeln!(out, "  Earliest:  {}", earliest.format("%Y-%m-%d %H:%M:%S%:z"))?;
            writeln!(out, "  Latest:    {}", latest.format("%Y-%m-%d %H:%M:%S%:z"))?;
            writeln!(out, "  Records with date: {}/{}", dates.len(), cleaned.len())?;
        }
        _ => writeln!(out, "  No valid dates found.")?,
    }
    Ok(())
}

fn write_details(out: &mut String, shown: &[FailureDetail], total: usize) -> Result<()> {
    for detail in shown {
        writeln!(out, "  Index:  {}", detail.index)?;
        writeln!(out, "  Reason: {}", detail.message)?;
        writeln!(out)?;
    }
    if total > shown.len() {
        writeln!(
            out,
            "  ... and {} more failed records (raise max_failed_details to show more)",
            total - shown.len()
        )?;
        writeln!(out)?;
    }
    Ok(())
}
