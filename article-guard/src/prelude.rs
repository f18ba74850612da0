//! Prelude for commonly used types and traits in article-guard.

pub use crate::aggregator::BatchValidator;
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineSummary};
pub use crate::reason::{ReasonClassifier, ReasonCode};
pub use crate::record::Record;
pub use crate::report::{PipelineCounts, QualityReport, ReportConfig, ValidationSummary};
pub use crate::stats::{FailureDetail, ReasonTally, ValidationStatistics};
pub use crate::validator::{FieldValidator, ValidationOutcome, Violation};
