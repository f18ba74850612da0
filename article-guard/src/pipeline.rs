//! End-to-end batch run: load, clean, validate, report, save.

use crate::aggregator::BatchValidator;
use crate::clean::{deduplicate, drop_incomplete, normalize_batch};
use crate::error::{ErrorContext, GuardError, Result};
use crate::report::{PipelineCounts, QualityReport, ReportConfig};
use crate::source::{load_records, save_records, write_text};
use crate::stats::ValidationStatistics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// File locations and report options for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw scraped records
    pub input: PathBuf,
    /// Where the records that passed validation are written
    pub output: PathBuf,
    /// Where the quality report is written
    pub report: PathBuf,
    /// Optional JSON dump of the validation statistics
    pub stats_output: Option<PathBuf>,
    /// List every failed record in the report
    pub include_failed_details: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("sample_data.json"),
            output: PathBuf::from("cleaned_output.json"),
            report: PathBuf::from("quality_report.txt"),
            stats_output: None,
            include_failed_details: true,
        }
    }
}

impl PipelineConfig {
    /// Loads a configuration from a JSON file. Missing keys take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| GuardError::Configuration(format!("{}: {e}", path.display())))
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report = path.into();
        self
    }

    pub fn with_stats_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.stats_output = Some(path.into());
        self
    }

    pub fn with_failed_details(mut self, include: bool) -> Self {
        self.include_failed_details = include;
        self
    }

    /// Rejects configurations that would overwrite the input.
    pub fn validate(&self) -> Result<()> {
        let outputs = [Some(&self.output), Some(&self.report), self.stats_output.as_ref()];
        if outputs.into_iter().flatten().any(|p| p == &self.input) {
            return Err(GuardError::Configuration(format!(
                "output paths must differ from the input {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub loaded: usize,
    pub cleaned: usize,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Runs the full cleaning and validation pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    validator: BatchValidator,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            validator: BatchValidator::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Executes the six pipeline steps and writes all outputs.
    #[instrument(skip_all, fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<PipelineSummary> {
        self.config.validate()?;

        info!(step = "1/6", "load raw data");
        let raw = load_records(&self.config.input)?;
        let loaded = raw.len();

        info!(step = "2/6", "cleaning");
        let (normalized, normalization) = normalize_batch(raw);
        info!(
            fields = ?normalization.text_fields,
            dates_parsed = normalization.dates_parsed,
            dates_invalid = normalization.dates_invalid,
            "normalized text and dates"
        );
        let before_drop = normalized.len();
        let complete = drop_incomplete(normalized);
        let dropped_incomplete = before_drop - complete.len();
        info!(
            removed = dropped_incomplete,
            remaining = complete.len(),
            "dropped incomplete records"
        );
        let before_dedup = complete.len();
        let cleaned = deduplicate(complete);
        let dropped_duplicates = before_dedup - cleaned.len();
        info!(
            removed = dropped_duplicates,
            remaining = cleaned.len(),
            "removed duplicates"
        );

        info!(step = "3/6", "validation");
        let stats = self.validator.aggregate(&cleaned);
        for (code, count) in stats.failure_reasons.most_common() {
            info!(reason = %code, count, label = code.label(), "failure reason");
        }

        info!(step = "4/6", "select valid records");
        let valid = stats.partition_valid(&cleaned);
        info!(valid = valid.len(), "valid records to save");

        info!(step = "5/6", "generate quality report");
        let counts = PipelineCounts {
            loaded,
            cleaned: cleaned.len(),
            dropped_incomplete,
            dropped_duplicates,
        };
        let report = QualityReport::with_config(
            ReportConfig::default().with_failed_details(self.config.include_failed_details),
        )
        .render(&stats, &counts, &cleaned)?;
        info!(chars = report.len(), "report rendered");

        info!(step = "6/6", "save output files");
        save_records(&self.config.output, &valid)?;
        write_text(&self.config.report, &report)?;
        if let Some(path) = &self.config.stats_output {
            write_stats(path, &stats)?;
        }

        let summary = PipelineSummary {
            loaded,
            cleaned: cleaned.len(),
            dropped_incomplete,
            dropped_duplicates,
            passed: stats.passed,
            failed: stats.failed,
        };
        info!(
            loaded = summary.loaded,
            cleaned = summary.cleaned,
            saved = valid.len(),
            "pipeline complete"
        );
        Ok(summary)
    }
}

fn write_stats(path: &Path, stats: &ValidationStatistics) -> Result<()> {
    let json = stats.to_json()?;
    write_text(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("sample_data.json"));
        assert_eq!(config.output, PathBuf::from("cleaned_output.json"));
        assert_eq!(config.report, PathBuf::from("quality_report.txt"));
        assert!(config.include_failed_details);
        assert!(config.stats_output.is_none());
    }

    #[test]
    fn test_config_rejects_overwriting_input() {
        let config = PipelineConfig::default().with_output("sample_data.json");
        assert!(matches!(
            config.validate(),
            Err(GuardError::Configuration(_))
        ));
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"input": "raw.json", "include_failed_details": false}"#)
            .unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("raw.json"));
        assert_eq!(config.report, PathBuf::from("quality_report.txt"));
        assert!(!config.include_failed_details);
    }

    #[test]
    fn test_config_from_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"input": 3}"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_file(&path),
            Err(GuardError::Configuration(_))
        ));
    }
}
