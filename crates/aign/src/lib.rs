//! AIGN - AI-assisted novel generation
//!
//! AIGN drives a chat-completion model through a fixed writing workflow:
//! expand a rough outline, write paragraphs one at a time, embellish them,
//! and keep a narrative memory so later paragraphs stay consistent with
//! earlier ones.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aign::{Aign, AignConfig, ChatDriver, OpenAICompatibleClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AignConfig::load()?;
//!     let driver: Arc<dyn ChatDriver> =
//!         Arc::new(OpenAICompatibleClient::from_config(&config.provider)?);
//!
//!     let mut aign = Aign::new(driver, &config).await?;
//!     let outline = aign.expand_outline("一个少年离开山村去寻找失踪的父亲").await?;
//!     let paragraph = aign.generate_paragraph(&outline, "少年在黎明前出发").await?;
//!     println!("{paragraph}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `aign_error` - Error types
//! - `aign_core` - Messages, transcripts and completion requests
//! - `aign_interface` - `ChatDriver` trait and streaming
//! - `aign_retry` - Bounded retry and configuration
//! - `aign_models` - OpenAI-compatible HTTP transport
//! - `aign_narrative` - Agents, narrative memory and the orchestrator
//!
//! This crate (`aign`) re-exports everything for convenience.

pub use aign_core::*;
pub use aign_error::*;
pub use aign_interface::*;
pub use aign_models::OpenAICompatibleClient;
pub use aign_narrative::{
    Aign, CharacterPair, ConversationalAgent, EntityGraphMemory, MemorySnapshot, NarrativeMemory,
    RollingSummaryMemory, SectionMap, StructuredReply, call_structured, memory_for, prompts,
};
pub use aign_retry::{
    AgentSettings, AgentsConfig, AignConfig, MemoryConfig, MemoryStrategy, ProviderConfig,
    RetryConfig, RetryPolicy, retry,
};
