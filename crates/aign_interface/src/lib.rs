//! Trait definitions for AIGN chat-completion backends.
//!
//! The narrative core depends only on [`ChatDriver`]; concrete transports live
//! in `aign_models`, scripted fakes live in test utilities.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod stream;
mod traits;
mod types;

pub use stream::collect_stream;
pub use traits::{ChatDriver, ChunkStream, Streaming};
pub use types::{FinishReason, StreamChunk};
