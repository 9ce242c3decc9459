//! Streaming payload types.

use serde::{Deserialize, Serialize};

/// A piece of an incrementally delivered reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Text delta
    pub content: String,
    /// Whether this is the final chunk
    pub is_final: bool,
    /// Optional finish reason if final
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl StreamChunk {
    /// Intermediate chunk.
    pub fn delta(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_final: false,
            finish_reason: None,
        }
    }

    /// Closing chunk.
    pub fn last(content: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            content: content.into(),
            is_final: true,
            finish_reason: Some(finish_reason),
        }
    }
}

/// Why generation stopped.
///
/// Parsed from the provider's `finish_reason` string; unrecognised values map
/// to [`FinishReason::Other`].
///
/// # Examples
///
/// ```
/// use aign_interface::FinishReason;
///
/// assert_eq!(FinishReason::from_provider("length"), FinishReason::Length);
/// assert_eq!(FinishReason::from_provider("sensitive"), FinishReason::Other);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    /// Model completed naturally
    Stop,
    /// Hit max_tokens limit
    Length,
    /// Content was filtered
    ContentFilter,
    /// Other/unknown reason
    Other,
}

impl FinishReason {
    /// Map a provider string, defaulting to `Other`.
    pub fn from_provider(reason: &str) -> Self {
        reason.parse().unwrap_or(Self::Other)
    }
}
