//! Agents, narrative memory and orchestration for AIGN.
//!
//! Layered bottom-up:
//!
//! - [`SectionMap`] / [`call_structured`]: one completion parsed into
//!   `# heading` sections, with required names enforced
//! - [`ConversationalAgent`]: a role prompt, sampling parameters and optional
//!   transcript memory, invoked through [`aign_retry::retry`]
//! - [`NarrativeMemory`]: rolling-summary or entity-graph continuity state
//! - [`Aign`]: the outline, write, embellish and remember workflow
//!
//! # Example
//!
//! ```no_run
//! use aign_narrative::Aign;
//! use aign_retry::AignConfig;
//! use std::sync::Arc;
//!
//! # async fn example(driver: Arc<dyn aign_interface::ChatDriver>) -> aign_error::AignResult<()> {
//! let config = AignConfig::load()?;
//! let mut aign = Aign::new(driver, &config).await?;
//!
//! let paragraph = aign.generate_paragraph("第一章：出发", "主角离开村庄").await?;
//! println!("{paragraph}\n\n{}", aign.memory_summary());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod extraction;
mod memory;
mod orchestrator;
pub mod prompts;
mod sections;
mod structured;

pub use agent::{ConversationalAgent, compose_prompt};
pub use extraction::{Extraction, ExtractionPayload, RelationshipEntry, parse_extraction};
pub use memory::{
    CharacterPair, EntityGraphMemory, MemorySnapshot, NarrativeMemory, RECENT_WINDOW,
    RollingSummaryMemory, memory_for,
};
pub use orchestrator::Aign;
pub use sections::{SECTION_MARKER, SectionMap, normalize_section_name};
pub use structured::{StructuredReply, call_structured};
