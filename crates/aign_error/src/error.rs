//! Top-level error wrapper types.

use crate::{
    ConfigError, ExhaustedRetriesError, ExtractionError, JsonError, MalformedSnapshotError,
    SectionParseError, TransportError,
};

/// Every error condition an AIGN operation can surface.
///
/// # Examples
///
/// ```
/// use aign_error::{AignError, AignErrorKind, MalformedSnapshotError};
///
/// let err: AignError = MalformedSnapshotError::new("missing field `summaries`").into();
/// assert!(matches!(err.kind(), AignErrorKind::Snapshot(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AignErrorKind {
    /// Chat-completion call failed
    #[from(TransportError)]
    Transport(TransportError),
    /// Reply lacked a required section
    #[from(SectionParseError)]
    SectionParse(SectionParseError),
    /// Retry budget exhausted
    #[from(ExhaustedRetriesError)]
    ExhaustedRetries(ExhaustedRetriesError),
    /// Memory snapshot rejected
    #[from(MalformedSnapshotError)]
    Snapshot(MalformedSnapshotError),
    /// Memory extraction payload rejected
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// AIGN error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("AIGN Error: {}", _0)]
pub struct AignError(Box<AignErrorKind>);

impl AignError {
    /// Create a new error from a kind.
    pub fn new(kind: AignErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AignErrorKind {
        &self.0
    }

    /// Whether this is the terminal retry failure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind(), AignErrorKind::ExhaustedRetries(_))
    }
}

// Generic From implementation for any type that converts to AignErrorKind
impl<T> From<T> for AignError
where
    T: Into<AignErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for AIGN operations.
pub type AignResult<T> = std::result::Result<T, AignError>;
