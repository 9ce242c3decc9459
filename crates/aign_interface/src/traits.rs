//! Trait definitions for chat-completion backends.

use crate::StreamChunk;
use aign_core::{CompletionRequest, CompletionResponse};
use aign_error::AignResult;
use async_trait::async_trait;
use futures_util::stream::Stream;
use std::pin::Pin;

/// Core trait that every chat-completion backend implements.
///
/// One call, one complete reply. Any failure is reported as an error and
/// left to the caller's retry policy.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Send the transcript and return the full completion text.
    async fn complete(&self, req: &CompletionRequest) -> AignResult<CompletionResponse>;

    /// Provider name (e.g., "zhipu", "openai").
    fn provider_name(&self) -> &str;

    /// Model identifier (e.g., "glm-4").
    fn model_name(&self) -> &str;
}

/// Boxed stream of completion chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = AignResult<StreamChunk>> + Send>>;

/// Backends that can deliver a reply incrementally.
#[async_trait]
pub trait Streaming: ChatDriver {
    /// Generate a streaming response.
    ///
    /// Returns a stream that yields chunks as they arrive from the API.
    async fn complete_stream(&self, req: &CompletionRequest) -> AignResult<ChunkStream>;
}
