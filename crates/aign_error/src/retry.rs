//! Terminal retry failure.

/// Every attempt of a retried operation failed.
///
/// # Examples
///
/// ```
/// use aign_error::ExhaustedRetriesError;
///
/// let err = ExhaustedRetriesError::new("writer", 10, "section '段落' is missing");
/// assert_eq!(err.attempts, 10);
/// assert!(format!("{}", err).contains("writer"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Exhausted Retries Error: '{}' failed {} times, last error: {} at line {} in {}",
    operation,
    attempts,
    last_error,
    line,
    file
)]
pub struct ExhaustedRetriesError {
    /// Name of the operation that was retried
    pub operation: String,
    /// Number of attempts made
    pub attempts: u32,
    /// Rendered error of the final attempt
    pub last_error: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ExhaustedRetriesError {
    /// Create a new ExhaustedRetriesError at the current location.
    #[track_caller]
    pub fn new(operation: impl Into<String>, attempts: u32, last_error: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            attempts,
            last_error: last_error.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
