//! Article Pipeline
//!
//! Loads scraped articles, cleans and validates them, then writes the valid
//! records and a quality report.

use anyhow::{Context, Result};
use article_guard::logging::setup::{init_logging, LoggingConfig};
use article_guard::pipeline::{Pipeline, PipelineConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "article-pipeline", version, about = "Clean, validate and report on scraped articles")]
struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw scraped records (JSON)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where valid records are written
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where the quality report is written
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Also write validation statistics as JSON
    #[arg(long)]
    stats_output: Option<PathBuf>,

    /// Leave per-record failure details out of the report
    #[arg(long)]
    no_failed_details: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = &self.input {
            config = config.with_input(input);
        }
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(report) = &self.report {
            config = config.with_report(report);
        }
        if let Some(stats) = &self.stats_output {
            config = config.with_stats_output(stats);
        }
        if self.no_failed_details {
            config = config.with_failed_details(false);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(
        LoggingConfig::default()
            .with_level(cli.log_level)
            .with_json_format(cli.json_logs),
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let config = cli.pipeline_config()?;
    let summary = Pipeline::new(config.clone())
        .run()
        .with_context(|| format!("pipeline failed for {}", config.input.display()))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!(
        "{} loaded -> {} after cleaning -> {} valid (saved to {})",
        summary.loaded,
        summary.cleaned,
        summary.passed,
        config.output.display()
    );
    Ok(())
}
