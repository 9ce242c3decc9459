//! Ordered conversation history.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Append-only sequence of turns sent as context to a model call.
///
/// The only way to shrink a transcript is [`Transcript::truncate_to_seed`],
/// which drops everything after the first two turns.
///
/// # Examples
///
/// ```
/// use aign_core::{Message, Transcript};
///
/// let mut transcript = Transcript::seeded("你是一个小说作家", "明白了。");
/// transcript.push(Message::user("写一段"));
/// transcript.push(Message::assistant("# 段落\n从前"));
/// assert_eq!(transcript.len(), 4);
///
/// transcript.truncate_to_seed();
/// assert_eq!(transcript.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript(Vec<Message>);

/// Number of turns that make up a seeded transcript.
const SEED_TURNS: usize = 2;

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a system prompt (as a user turn) and an acknowledgement.
    pub fn seeded(system_prompt: impl Into<String>, acknowledgement: impl Into<String>) -> Self {
        Self(vec![
            Message::user(system_prompt),
            Message::assistant(acknowledgement),
        ])
    }

    /// Append a turn.
    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    /// Drop every turn after the seed pair.
    pub fn truncate_to_seed(&mut self) {
        self.0.truncate(SEED_TURNS);
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the transcript has no turns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the turns in order.
    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    /// Copy of the turns extended by one trailing message.
    pub fn extended_with(&self, message: Message) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.0.len() + 1);
        messages.extend_from_slice(&self.0);
        messages.push(message);
        messages
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}
