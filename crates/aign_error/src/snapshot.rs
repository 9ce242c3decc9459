//! Memory snapshot import errors.

/// An imported memory snapshot did not match the expected shape.
///
/// Import is rejected as a whole; in-memory state is left untouched.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed Snapshot Error: {} at line {} in {}", message, line, file)]
pub struct MalformedSnapshotError {
    /// What was wrong with the snapshot
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MalformedSnapshotError {
    /// Create a new MalformedSnapshotError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
