//! Request and response types for chat completion.

use crate::Message;
use serde::{Deserialize, Serialize};

/// One non-streaming chat-completion call.
///
/// # Examples
///
/// ```
/// use aign_core::{CompletionRequestBuilder, Message};
///
/// let request = CompletionRequestBuilder::default()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(0.81)
///     .top_p(0.8)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
pub struct CompletionRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Maximum number of tokens to generate
    #[builder(default, setter(strip_option))]
    pub max_tokens: Option<u32>,
    /// Model identifier overriding the driver's default
    #[builder(default, setter(into, strip_option))]
    pub model: Option<String>,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// Complete text returned by a chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CompletionResponse {
    /// Generated text
    content: String,
    /// Token accounting, when the provider reports it
    usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a response.
    pub fn new(content: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            content: content.into(),
            usage,
        }
    }

    /// Take the generated text.
    pub fn into_content(self) -> String {
        self.content
    }
}
