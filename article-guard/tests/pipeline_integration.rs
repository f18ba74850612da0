//! End-to-end tests for the file-based pipeline.

use article_guard::prelude::*;
use article_guard::source::load_records;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn long_body(tag: &str) -> String {
    format!("{tag} {}", "lorem ipsum dolor sit amet ".repeat(6))
}

fn write_input(dir: &Path, value: serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("raw.json");
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn config_in(dir: &TempDir, input: std::path::PathBuf) -> PipelineConfig {
    PipelineConfig::default()
        .with_input(input)
        .with_output(dir.path().join("out/cleaned.json"))
        .with_report(dir.path().join("out/quality_report.txt"))
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        json!([
            {
                "title": "  First &amp; foremost ",
                "content": long_body("one"),
                "url": "https://news.example.com/1",
                "published": "2024-01-02",
                "author": "A.  Writer"
            },
            {
                "title": "First & foremost",
                "content": long_body("dup"),
                "url": "https://news.example.com/1",
                "published": "2024-01-03"
            },
            {
                "title": "",
                "content": long_body("no title"),
                "url": "https://news.example.com/2",
                "published": "2024-01-04"
            },
            {
                "title": "Short one",
                "content": "too short",
                "url": "https://news.example.com/3",
                "published": "2024-01-05"
            },
            {
                "title": "Bad link",
                "content": long_body("bad"),
                "url": "news.example.com/4",
                "published": "not a date"
            },
            {
                "title": "Last",
                "content": long_body("last"),
                "url": "http://news.example.com/5",
                "published": "Fri, 05 Jan 2024 09:00:00 +0000"
            }
        ]),
    );
    let config = config_in(&dir, input).with_stats_output(dir.path().join("out/stats.json"));

    let summary = Pipeline::new(config.clone()).run().unwrap();
    assert_eq!(
        summary,
        PipelineSummary {
            loaded: 6,
            cleaned: 4,
            dropped_incomplete: 1,
            dropped_duplicates: 1,
            passed: 2,
            failed: 2,
        }
    );

    let saved = load_records(&config.output).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].text("title"), "First & foremost");
    assert_eq!(saved[0].text("author"), "A. Writer");
    assert_eq!(saved[0].text("published_date"), "2024-01-02T00:00:00Z");
    assert_eq!(saved[1].text("published_date"), "2024-01-05T09:00:00Z");

    let report = std::fs::read_to_string(&config.report).unwrap();
    assert!(report.contains("  Total records processed:   6"));
    assert!(report.contains("  Cleaned record count:      4"));
    assert!(report.contains("    - Missing (incomplete):  1"));
    assert!(report.contains("  Pass rate:                 50.0%"));
    assert!(report.contains("  Earliest:  2024-01-02 00:00:00+00:00"));
    assert!(report.contains("  Records with date: 3/4"));
    assert!(report.contains("  End-to-end retention:  33.3% (2/6 records saved)"));
    assert!(report.contains("FAILED RECORD DETAILS"));

    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out/stats.json")).unwrap())
            .unwrap();
    assert_eq!(stats["failed"], json!(2));
    assert_eq!(stats["failure_reasons"]["short_content"], json!(1));
    assert_eq!(stats["failure_reasons"]["invalid_url"], json!(1));
}

#[test]
fn test_pipeline_wrapped_articles_without_details() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        json!({
            "articles": [
                {
                    "title": "Only",
                    "content": "tiny",
                    "url": "https://a.com",
                    "published_date": "2024-02-02"
                }
            ]
        }),
    );
    let config = config_in(&dir, input).with_failed_details(false);

    let summary = Pipeline::new(config.clone()).run().unwrap();
    assert_eq!(summary.failed, 1);

    let report = std::fs::read_to_string(&config.report).unwrap();
    assert!(!report.contains("FAILED RECORD DETAILS"));
    assert!(report.contains("  Top failure reason:     Content is too short (minimum 120 characters). (n=1)"));
    assert!(load_records(&config.output).unwrap().is_empty());
}

#[test]
fn test_pipeline_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), json!([]));
    let config = config_in(&dir, input);

    let summary = Pipeline::new(config.clone()).run().unwrap();
    assert_eq!(summary, PipelineSummary::default());

    let report = std::fs::read_to_string(&config.report).unwrap();
    assert!(report.contains("  Pass rate:                 0.0%"));
    assert!(report.contains("  (none)"));
    assert!(report.ends_with("End of report"));
}

#[test]
fn test_pipeline_rejects_structurally_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), json!([{"title": "a"}, 7]));
    let config = config_in(&dir, input);

    let err = Pipeline::new(config.clone()).run().unwrap_err();
    assert!(matches!(err, GuardError::InvalidInput { .. }));
    assert!(!config.report.exists());
}

#[test]
fn test_pipeline_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, dir.path().join("absent.json"));
    let err = Pipeline::new(config).run().unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
