//! Error types for the article-guard library.
//!
//! Validation itself never fails: a malformed field value is a data-quality
//! finding, not an error. `GuardError` is only produced by the collaborators
//! around the engine (file I/O, structurally invalid input, report writing).

use thiserror::Error;

/// The main error type for the article-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON (de)serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input collection does not have the shape the pipeline expects.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Detailed error message
        message: String,
    },

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error while writing a report.
    #[error("Report formatting error: {0}")]
    Report(#[from] std::fmt::Error),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
///
/// # Examples
///
/// ```rust
/// use article_guard::error::Result;
///
/// fn load() -> Result<usize> {
///     Ok(0)
/// }
/// # assert_eq!(load().unwrap(), 0);
/// ```
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            GuardError::Internal(inner) => GuardError::Internal(format!("{}: {}", f(), inner)),
            GuardError::InvalidInput { message } => GuardError::InvalidInput {
                message: format!("{}: {}", f(), message),
            },
            other => GuardError::Internal(format!("{}: {}", f(), other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = GuardError::invalid_input("element 3 is not an object");
        assert_eq!(err.to_string(), "Invalid input: element 3 is not an object");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GuardError = io.into();
        assert!(matches!(err, GuardError::Io(_)));
        assert_eq!(err.to_string(), "IO error: File not found");
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(GuardError::Internal("Something went wrong".to_string()))
        }

        let err = failing_operation().context("loading records").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: loading records: Something went wrong"
        );
    }

    #[test]
    fn test_error_context_keeps_invalid_input() {
        let result: std::result::Result<(), GuardError> =
            Err(GuardError::invalid_input("not an object"));
        let err = result
            .with_context(|| "reading data.json".to_string())
            .unwrap_err();
        assert!(matches!(err, GuardError::InvalidInput { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid input: reading data.json: not an object"
        );
    }
}
