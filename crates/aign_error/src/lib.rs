//! Error types for AIGN.
//!
//! This crate provides the error taxonomy shared by every AIGN crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! The agent-invocation protocol distinguishes four failure classes:
//! [`TransportError`] and [`SectionParseError`] are always retried,
//! [`ExhaustedRetriesError`] is terminal, and [`MalformedSnapshotError`]
//! rejects a memory import without touching current state.
//!
//! # Examples
//!
//! ```
//! use aign_error::{AignResult, TransportError, TransportErrorKind};
//!
//! fn call_model() -> AignResult<String> {
//!     Err(TransportError::new(TransportErrorKind::Http("Connection refused".into())))?
//! }
//!
//! assert!(call_model().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod extraction;
mod json;
mod retry;
mod section;
mod snapshot;
mod transport;

pub use config::ConfigError;
pub use error::{AignError, AignErrorKind, AignResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use json::JsonError;
pub use retry::ExhaustedRetriesError;
pub use section::{RAW_PREVIEW_CHARS, SectionFailure, SectionParseError};
pub use snapshot::MalformedSnapshotError;
pub use transport::{TransportError, TransportErrorKind};
