//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single role-tagged turn.
///
/// # Examples
///
/// ```
/// use aign_core::{Message, Role};
///
/// let message = Message::user("# 章节大纲\n主角出发\n\n");
/// assert_eq!(*message.role(), Role::User);
/// assert!(message.content().contains("主角"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// Text of the turn
    content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
