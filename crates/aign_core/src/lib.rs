//! Core data types for AIGN.
//!
//! This crate provides the conversation model shared by the agents, the
//! transport and the orchestrator: role-tagged messages, transcripts, and the
//! request/response pair exchanged with a chat-completion backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;
mod sampling;
mod telemetry;
mod transcript;

pub use message::Message;
pub use request::{CompletionRequest, CompletionRequestBuilder, CompletionResponse, TokenUsage};
pub use role::Role;
pub use sampling::SamplingParams;
pub use telemetry::init_tracing;
pub use transcript::Transcript;
