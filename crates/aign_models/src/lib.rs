//! Chat-completion transports for AIGN.
//!
//! The narrative core talks to models only through
//! [`aign_interface::ChatDriver`]. This crate provides the production
//! implementation, a client for any OpenAI-compatible `/chat/completions`
//! endpoint (GLM-4, OpenAI, Groq, local servers).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai_compat;

pub use openai_compat::{
    ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, OpenAICompatibleClient,
};
