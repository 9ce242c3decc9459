//! Chat-completion transport errors.

/// Failure modes of the external chat-completion call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Network or connection failure
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Provider rejected the call for exceeding its quota
    #[display("Rate limit exceeded")]
    RateLimited,
    /// Response carried no completion choices
    #[display("Response contained no completion")]
    EmptyResponse,
    /// Response body could not be decoded
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),
    /// Request could not be built
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use aign_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::RateLimited);
/// assert!(format!("{}", err).contains("Rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
