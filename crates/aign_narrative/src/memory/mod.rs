//! Narrative memory: continuity state carried between generation rounds.
//!
//! Two designs share one interface. [`RollingSummaryMemory`] keeps a premise
//! and a bounded window of plot summaries; [`EntityGraphMemory`] keeps
//! character statuses and relationships. The orchestrator holds a
//! `Box<dyn NarrativeMemory>` chosen by [`MemoryStrategy`].

mod entity;
mod pair;
mod rolling;
mod snapshot;

pub use entity::EntityGraphMemory;
pub use pair::CharacterPair;
pub use rolling::{RECENT_WINDOW, RollingSummaryMemory};
pub use snapshot::MemorySnapshot;

use crate::ConversationalAgent;
use aign_error::{AignResult, MalformedSnapshotError};
use aign_retry::{MemoryConfig, MemoryStrategy};
use async_trait::async_trait;

/// Continuity state updated after every accepted passage.
#[async_trait]
pub trait NarrativeMemory: Send + Sync + std::fmt::Debug {
    /// Which design this is.
    fn strategy(&self) -> MemoryStrategy;

    /// System prompt for the agent that feeds [`absorb`](Self::absorb).
    fn extractor_prompt(&self) -> &'static str;

    /// Text handed to the writer as prior context.
    fn context(&self) -> String;

    /// Update from a newly accepted passage using the extraction agent.
    ///
    /// State changes only after the agent call fully succeeds.
    async fn absorb(&mut self, extractor: &mut ConversationalAgent, passage: &str) -> AignResult<()>;

    /// Copy of the raw state for export.
    fn snapshot(&self) -> MemorySnapshot;

    /// Replace the state wholesale.
    ///
    /// # Errors
    ///
    /// A snapshot of the other design, or one that fails validation, is
    /// rejected and the current state is left untouched.
    fn restore(&mut self, snapshot: MemorySnapshot) -> Result<(), MalformedSnapshotError>;

    /// Downcast to the rolling-summary design.
    fn as_rolling_summary(&self) -> Option<&RollingSummaryMemory> {
        None
    }

    /// Downcast to the entity-graph design.
    fn as_entity_graph(&self) -> Option<&EntityGraphMemory> {
        None
    }
}

/// Build an empty memory for the configured design.
pub fn memory_for(config: &MemoryConfig) -> Box<dyn NarrativeMemory> {
    match config.strategy {
        MemoryStrategy::RollingSummary => Box::new(RollingSummaryMemory::new(config.premise.clone())),
        MemoryStrategy::EntityGraph => Box::new(EntityGraphMemory::new()),
    }
}
