//! Rolling-summary narrative memory.

use crate::memory::{MemorySnapshot, NarrativeMemory};
use crate::{ConversationalAgent, prompts};
use aign_error::{AignResult, MalformedSnapshotError};
use aign_retry::MemoryStrategy;
use async_trait::async_trait;
use tracing::debug;

/// Number of most recent summaries read back into prompts.
pub const RECENT_WINDOW: usize = 3;

/// A fixed premise plus an ordered list of plot summaries.
///
/// Every summary is kept for export, but only the last
/// [`RECENT_WINDOW`] are included in prompt context.
///
/// # Examples
///
/// ```
/// use aign_narrative::RollingSummaryMemory;
///
/// let mut memory = RollingSummaryMemory::new("龙藏在山村里。");
/// for i in 1..=5 {
///     memory.record_summary(format!("第{}段", i));
/// }
/// assert_eq!(memory.recent_context(), "龙藏在山村里。\n第3段\n第4段\n第5段");
/// assert_eq!(memory.summaries().len(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingSummaryMemory {
    premise: String,
    summaries: Vec<String>,
}

impl RollingSummaryMemory {
    /// Start with a premise and no summaries.
    pub fn new(premise: impl Into<String>) -> Self {
        Self {
            premise: premise.into(),
            summaries: Vec::new(),
        }
    }

    /// Global premise.
    pub fn premise(&self) -> &str {
        &self.premise
    }

    /// Every recorded summary, oldest first.
    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    /// Append a summary.
    pub fn record_summary(&mut self, text: impl Into<String>) {
        self.summaries.push(text.into());
    }

    /// Premise followed by at most the last three summaries, newline-joined.
    ///
    /// An empty premise is omitted.
    pub fn recent_context(&self) -> String {
        let skip = self.summaries.len().saturating_sub(RECENT_WINDOW);
        std::iter::once(self.premise.as_str())
            .filter(|premise| !premise.is_empty())
            .chain(self.summaries[skip..].iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl NarrativeMemory for RollingSummaryMemory {
    fn strategy(&self) -> MemoryStrategy {
        MemoryStrategy::RollingSummary
    }

    fn extractor_prompt(&self) -> &'static str {
        prompts::SUMMARIZER
    }

    fn context(&self) -> String {
        self.recent_context()
    }

    async fn absorb(&mut self, extractor: &mut ConversationalAgent, passage: &str) -> AignResult<()> {
        let context = self.recent_context();
        let mut sections = extractor
            .invoke(
                &[
                    (prompts::PRIOR_MEMORY, context.as_str()),
                    (prompts::NEW_PARAGRAPH, passage),
                ],
                &[prompts::PLOT_SUMMARY],
            )
            .await?;

        // required key, guaranteed present
        if let Some(summary) = sections.take(prompts::PLOT_SUMMARY) {
            self.record_summary(summary);
        }
        debug!(summaries = self.summaries.len(), "Recorded plot summary");
        Ok(())
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot::RollingSummary {
            premise: self.premise.clone(),
            summaries: self.summaries.clone(),
        }
    }

    fn restore(&mut self, snapshot: MemorySnapshot) -> Result<(), MalformedSnapshotError> {
        match snapshot {
            MemorySnapshot::RollingSummary { premise, summaries } => {
                self.premise = premise;
                self.summaries = summaries;
                Ok(())
            }
            other => Err(MalformedSnapshotError::new(format!(
                "expected a rolling_summary snapshot, got {}",
                other.strategy()
            ))),
        }
    }

    fn as_rolling_summary(&self) -> Option<&RollingSummaryMemory> {
        Some(self)
    }
}
