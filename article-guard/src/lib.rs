//! # article-guard - Validation and quality reporting for scraped articles
//!
//! article-guard cleans a batch of scraped article records, checks every
//! survivor against a fixed set of field rules and turns the outcome into
//! summary statistics and a plain-text quality report.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_guard::prelude::*;
//!
//! let records = vec![
//!     Record::new()
//!         .with("title", "Rust 1.80 released")
//!         .with("content", "x".repeat(200))
//!         .with("url", "https://blog.rust-lang.org/")
//!         .with("published_date", "2024-07-25"),
//!     Record::new()
//!         .with("title", "T")
//!         .with("content", "short")
//!         .with("url", "ftp://a.com")
//!         .with("published_date", "2024-01-01"),
//! ];
//!
//! let stats = BatchValidator::new().aggregate(&records);
//! assert_eq!(stats.passed, 1);
//! assert_eq!(stats.failure_reasons.get(ReasonCode::ShortContent), 1);
//!
//! let counts = PipelineCounts { loaded: 2, cleaned: 2, ..Default::default() };
//! let report = QualityReport::new().render(&stats, &counts, &records).unwrap();
//! assert!(report.contains("Pass rate:                 50.0%"));
//! ```
//!
//! ## Architecture
//!
//! - **`validator`**: per-record field checks producing structured violations
//! - **`reason`**: reason codes, their labels and the violation classifier
//! - **`aggregator`** / **`stats`**: batch validation and its statistics
//! - **`report`**: the quality report and the validation summary
//! - **`clean`** / **`source`**: normalization, filtering and JSON file I/O
//! - **`pipeline`**: the end-to-end run used by the `article-pipeline` binary

pub mod aggregator;
pub mod clean;
pub mod error;
pub mod limits;
pub mod logging;
pub mod pipeline;
pub mod prelude;
pub mod reason;
pub mod record;
pub mod report;
pub mod source;
pub mod stats;
pub mod validator;
