//! Generic OpenAI-compatible API client.
//!
//! This module provides a client for any API that follows the OpenAI chat
//! completions format, including server-sent-event streaming.

mod client;
mod conversions;
mod dto;
mod sse;

pub use client::OpenAICompatibleClient;
pub use dto::{ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse};
