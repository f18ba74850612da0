//! Property-based tests for the validation engine.
//!
//! Records are generated with every recognized field independently present,
//! blank, oddly typed or well-formed, so batches mix passing and failing
//! records in arbitrary proportions.

use article_guard::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn field_value() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        Just(Some(json!(""))),
        Just(Some(json!("   "))),
        Just(Some(json!(42))),
        Just(Some(json!(["a"]))),
        "[a-z ]{0,20}".prop_map(|s| Some(json!(s))),
        (100usize..140).prop_map(|n| Some(json!("c".repeat(n)))),
        prop_oneof![
            Just("https://example.com/a"),
            Just("http://"),
            Just("ftp://example.com"),
            Just("HTTP://EXAMPLE.COM"),
        ]
        .prop_map(|s| Some(json!(s))),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    (field_value(), field_value(), field_value(), field_value(), field_value()).prop_map(
        |(title, content, url, published_date, published)| {
            let mut record = Record::new();
            for (name, value) in [
                ("title", title),
                ("content", content),
                ("url", url),
                ("published_date", published_date),
                ("published", published),
            ] {
                if let Some(value) = value {
                    record.insert(name, value);
                }
            }
            record
        },
    )
}

proptest! {
    /// Tests that pass/fail, reason and message always agree.
    #[test]
    fn test_outcome_fields_agree(record in record()) {
        let outcome = FieldValidator::new().validate(&record);
        prop_assert_eq!(outcome.passed(), outcome.reason().is_none());
        prop_assert_eq!(outcome.passed(), outcome.message().is_none());
        prop_assert_eq!(outcome.passed(), outcome.violations().is_empty());
    }

    /// Tests that validation has no hidden state.
    #[test]
    fn test_validation_is_pure(record in record()) {
        let validator = FieldValidator::new();
        prop_assert_eq!(validator.validate(&record), validator.validate(&record));
    }

    /// Tests that the reason always comes from the first violation and the
    /// structured and text classifiers agree.
    #[test]
    fn test_reason_matches_first_violation(record in record()) {
        let outcome = FieldValidator::new().validate(&record);
        if let Some(first) = outcome.violations().first() {
            let reason = outcome.reason().unwrap();
            prop_assert_eq!(reason, ReasonClassifier::new().classify(first));
            prop_assert_eq!(reason, ReasonCode::from_message(&first.to_string()));
            prop_assert_ne!(reason, ReasonCode::ValidationFailed);
        }
    }

    /// Tests the batch invariants.
    ///
    /// Properties tested:
    /// - total = passed + failed
    /// - reason counts sum to failed
    /// - one detail per failure, indices strictly increasing
    #[test]
    fn test_batch_invariants(records in prop::collection::vec(record(), 0..40)) {
        let stats = BatchValidator::new().aggregate(&records);

        prop_assert_eq!(stats.total, records.len());
        prop_assert_eq!(stats.total, stats.passed + stats.failed);
        prop_assert_eq!(stats.failure_reasons.total(), stats.failed);
        prop_assert_eq!(stats.failed_record_details.len(), stats.failed);
        prop_assert!(stats
            .failed_record_details
            .windows(2)
            .all(|w| w[0].index < w[1].index));
        prop_assert_eq!(
            stats.partition_valid(&records).len(),
            stats.passed
        );
    }

    /// Tests that the failure distribution is sorted by descending count.
    #[test]
    fn test_most_common_is_sorted(records in prop::collection::vec(record(), 0..40)) {
        let stats = BatchValidator::new().aggregate(&records);
        let common = stats.failure_reasons.most_common();
        prop_assert!(common.windows(2).all(|w| w[0].1 >= w[1].1));
        prop_assert_eq!(stats.failure_reasons.top(), common.first().copied());
    }
}
