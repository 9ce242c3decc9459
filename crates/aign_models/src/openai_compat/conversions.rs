//! Type conversions between AIGN and OpenAI formats.

use crate::openai_compat::dto::{ChatMessage, ChatRequest, ChatResponse};
use aign_core::{CompletionRequest, CompletionResponse, TokenUsage};
use aign_error::{TransportError, TransportErrorKind};

/// Converts a CompletionRequest to OpenAI chat format.
///
/// Model and token cap fall back to the client's configured values.
pub fn to_chat_request(
    req: &CompletionRequest,
    default_model: &str,
    default_max_tokens: Option<u32>,
    stream: bool,
) -> Result<ChatRequest, TransportError> {
    let messages: Vec<ChatMessage> = req
        .messages
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role().to_string(),
            content: msg.content().clone(),
        })
        .collect();

    if messages.is_empty() {
        return Err(TransportError::new(TransportErrorKind::InvalidRequest(
            "Request has no messages".to_string(),
        )));
    }

    let mut builder = ChatRequest::builder();
    builder
        .model(req.model.clone().unwrap_or_else(|| default_model.to_string()))
        .messages(messages)
        .temperature(req.temperature)
        .top_p(req.top_p)
        .max_tokens(req.max_tokens.or(default_max_tokens));

    if stream {
        builder.stream(Some(true));
    }

    builder.build().map_err(|e| {
        TransportError::new(TransportErrorKind::InvalidRequest(format!(
            "Failed to build request: {}",
            e
        )))
    })
}

/// Converts an OpenAI chat response to a CompletionResponse.
pub fn from_chat_response(response: &ChatResponse) -> Result<CompletionResponse, TransportError> {
    let content = response
        .choices
        .first()
        .map(|choice| choice.message.content.clone())
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| TransportError::new(TransportErrorKind::EmptyResponse))?;

    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(prompt), Some(completion), Some(total)) => Some(TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: total,
            }),
            (Some(prompt), Some(completion), None) => Some(TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt + completion,
            }),
            _ => None,
        }
    });

    Ok(CompletionResponse::new(content, usage))
}
