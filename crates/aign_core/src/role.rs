//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Speaker of a transcript turn.
///
/// System prompts are sent as a user turn, so only two roles exist.
///
/// # Examples
///
/// ```
/// use aign_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::Assistant), "assistant");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turns written by the orchestrator on behalf of the author
    #[display("user")]
    User,
    /// Turns produced by the model
    #[display("assistant")]
    Assistant,
}
