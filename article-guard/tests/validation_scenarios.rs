//! Scenario tests for record validation, batch aggregation and the quality report.

use article_guard::prelude::*;
use serde_json::json;

fn article(title: &str, content: &str, url: &str) -> Record {
    Record::new()
        .with("title", title)
        .with("content", content)
        .with("url", url)
        .with("published_date", "2024-01-01")
}

fn body() -> String {
    "x".repeat(150)
}

#[test]
fn test_valid_article_passes() {
    let outcome = FieldValidator::new().validate(&article("T", &body(), "http://a.com"));
    assert!(outcome.passed());
    assert!(outcome.reason().is_none());
    assert!(outcome.message().is_none());
}

#[test]
fn test_empty_title_fails_with_missing_title() {
    let outcome = FieldValidator::new().validate(&article("", &body(), "http://a.com"));
    assert!(!outcome.passed());
    assert_eq!(outcome.reason(), Some(ReasonCode::MissingTitle));
    assert!(outcome
        .message()
        .unwrap()
        .contains("Title is missing or empty."));
}

#[test]
fn test_first_violation_decides_reason() {
    let outcome = FieldValidator::new().validate(&article("T", "short", "ftp://a.com"));
    assert!(!outcome.passed());
    assert_eq!(outcome.reason(), Some(ReasonCode::ShortContent));
    let message = outcome.message().unwrap();
    assert!(message.contains("Content is too short"));
    assert!(message.contains("URL must start with http:// or https://"));
}

#[test]
fn test_record_without_any_fields() {
    let outcome = FieldValidator::new().validate(&Record::new());
    assert_eq!(outcome.reason(), Some(ReasonCode::MissingTitle));
    assert_eq!(
        outcome.message(),
        Some(
            "Title is missing or empty. Content is missing or empty. \
             URL is missing or empty. Published date is missing or empty."
        )
    );
}

#[test]
fn test_passthrough_fields_do_not_matter() {
    let record = article("T", &body(), "https://a.com")
        .with("author", json!(null))
        .with("tags", json!(["rust", "data"]))
        .with("score", json!(3.5));
    assert!(FieldValidator::new().validate(&record).passed());
}

#[test]
fn test_batch_frequency_order_and_pass_rate() {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(article("T", &body(), &format!("https://a.com/{i}")));
    }
    for i in 0..2 {
        records.push(article("T", "tiny", &format!("https://b.com/{i}")));
    }
    for _ in 0..3 {
        records.push(article("T", &body(), ""));
    }

    let stats = BatchValidator::new().aggregate(&records);
    assert_eq!(stats.total, 10);
    assert_eq!(stats.passed, 5);
    assert_eq!(
        stats.failure_reasons.most_common(),
        vec![(ReasonCode::MissingUrl, 3), (ReasonCode::ShortContent, 2)]
    );

    let counts = PipelineCounts {
        loaded: 10,
        cleaned: 10,
        ..Default::default()
    };
    let report = QualityReport::new().render(&stats, &counts, &records).unwrap();
    assert!(report.contains("  Pass rate:                 50.0%"));
    let missing_url = report.find("URL is missing or empty.").unwrap();
    let short = report
        .find("Content is too short (minimum 120 characters).")
        .unwrap();
    assert!(missing_url < short);
}

#[test]
fn test_empty_batch_report() {
    let stats = BatchValidator::new().aggregate(&[]);
    let report = QualityReport::new()
        .render(&stats, &PipelineCounts::default(), &[])
        .unwrap();
    assert!(report.contains("  Pass rate:                 0.0%"));
    assert!(report.contains("4. VALIDATION FAILURE DISTRIBUTION\n------------------------------------------------------------\n  (none)"));
}

#[test]
fn test_failed_details_listed_in_input_order() {
    let records = vec![
        article("T", &body(), "nope"),
        article("T", &body(), "https://a.com"),
        article("", &body(), "https://a.com/x"),
    ];
    let stats = BatchValidator::new().aggregate(&records);
    let report = QualityReport::new()
        .render(&stats, &PipelineCounts::default(), &records)
        .unwrap();

    let first = report.find("  Index:  0").unwrap();
    let second = report.find("  Index:  2").unwrap();
    assert!(first < second);
    assert!(report.contains("  Reason: URL must start with http:// or https:// (got: nope)."));
    assert!(report.contains("  Reason: Title is missing or empty."));
}

#[test]
fn test_statistics_json_export() {
    let records = vec![article("T", "tiny", "https://a.com")];
    let stats = BatchValidator::new().aggregate(&records);
    let value: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();

    assert_eq!(value["failed"], json!(1));
    assert_eq!(value["failure_reasons"]["short_content"], json!(1));
    assert_eq!(value["failed_record_details"][0]["index"], json!(0));
    assert_eq!(value["failed_record_details"][0]["reason"], json!("short_content"));
    assert_eq!(value["failed_record_details"][0]["row"]["content"], json!("tiny"));
}
