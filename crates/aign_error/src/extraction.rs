//! Memory extraction payload errors.

/// Ways a character/relationship extraction payload can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// No JSON object found in the extraction text
    #[display("No extraction payload found (text length {})", _0)]
    NoPayload(usize),
    /// JSON present but not of the expected shape
    #[display("Invalid extraction payload: {}", _0)]
    InvalidPayload(String),
    /// A character name is blank
    #[display("Character name is blank")]
    BlankName,
    /// A status or relationship description is blank
    #[display("Blank description for '{}'", _0)]
    BlankValue(String),
    /// A relationship pairs a character with itself
    #[display("Relationship pairs '{}' with itself", _0)]
    SelfRelationship(String),
}

/// Extraction error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
