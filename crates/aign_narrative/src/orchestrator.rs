//! The AIGN orchestrator: sequences agent calls into the writing workflow.

use crate::memory::{MemorySnapshot, NarrativeMemory, memory_for};
use crate::{ConversationalAgent, SectionMap, prompts};
use aign_core::Transcript;
use aign_error::AignResult;
use aign_interface::ChatDriver;
use aign_retry::{AgentSettings, AignConfig, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Narrative generation orchestrator.
///
/// Owns four agents (outline expander, writer, embellisher, memory
/// extractor), one narrative memory and the accepted manuscript. All
/// operations take `&mut self`; separate instances share nothing.
///
/// An operation either completes or leaves the manuscript and narrative
/// memory exactly as they were.
#[derive(Debug)]
pub struct Aign {
    outline_expander: ConversationalAgent,
    writer: ConversationalAgent,
    embellisher: ConversationalAgent,
    memory_extractor: ConversationalAgent,
    memory: Box<dyn NarrativeMemory>,
    paragraphs: Vec<String>,
    embellishment_idea: String,
}

async fn agent(
    name: &str,
    driver: &Arc<dyn ChatDriver>,
    default_prompt: &str,
    settings: &AgentSettings,
    policy: RetryPolicy,
) -> AignResult<ConversationalAgent> {
    let system_prompt = settings.system_prompt.as_deref().unwrap_or(default_prompt);
    ConversationalAgent::create(name, Arc::clone(driver), system_prompt, settings, policy).await
}

impl Aign {
    /// Build the agents and an empty memory from configuration.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, or if an agent configured without an
    /// acknowledgement cannot obtain one from the model.
    #[instrument(skip_all, fields(provider = driver.provider_name(), model = driver.model_name()))]
    pub async fn new(driver: Arc<dyn ChatDriver>, config: &AignConfig) -> AignResult<Self> {
        config.validate()?;
        let policy = config.retry.policy()?;
        let agents = &config.agents;
        let memory = memory_for(&config.memory);

        let outline_expander = agent(
            "outline_expander",
            &driver,
            prompts::OUTLINE_EXPANDER,
            &agents.outline_expander,
            policy,
        )
        .await?;
        let writer = agent("writer", &driver, prompts::WRITER, &agents.writer, policy).await?;
        let embellisher = agent(
            "embellisher",
            &driver,
            prompts::EMBELLISHER,
            &agents.embellisher,
            policy,
        )
        .await?;
        let memory_extractor = agent(
            "memory_extractor",
            &driver,
            memory.extractor_prompt(),
            &agents.memory_extractor,
            policy,
        )
        .await?;

        info!(strategy = %memory.strategy(), "Orchestrator ready");

        Ok(Self {
            outline_expander,
            writer,
            embellisher,
            memory_extractor,
            memory,
            paragraphs: Vec::new(),
            embellishment_idea: String::new(),
        })
    }

    /// Expand a rough outline. Narrative memory is not touched.
    #[instrument(skip_all, fields(outline_length = outline.len()))]
    pub async fn expand_outline(&mut self, outline: &str) -> AignResult<String> {
        let sections = self
            .outline_expander
            .invoke(&[(prompts::OUTLINE, outline)], &[prompts::EXPANDED_OUTLINE])
            .await?;

        info!("Outline expanded");
        Ok(required(sections, prompts::EXPANDED_OUTLINE))
    }

    /// Write the next paragraph, update memory from it, and append it to the
    /// manuscript.
    ///
    /// On failure every agent transcript is rolled back as well.
    #[instrument(skip_all)]
    pub async fn generate_paragraph(
        &mut self,
        chapter_outline: &str,
        paragraph_outline: &str,
    ) -> AignResult<String> {
        let checkpoint = self.checkpoint();
        let result = self.write_and_absorb(chapter_outline, paragraph_outline).await;
        self.settle(checkpoint, result)
    }

    /// Embellish a passage and update memory from the result.
    ///
    /// If `paragraph` is the latest manuscript paragraph it is replaced by
    /// the embellished text; otherwise the manuscript is unchanged.
    #[instrument(skip_all)]
    pub async fn embellish_paragraph(
        &mut self,
        paragraph: &str,
        embellishment_request: &str,
    ) -> AignResult<String> {
        let checkpoint = self.checkpoint();
        let result = self
            .embellish_and_absorb(paragraph, embellishment_request)
            .await;
        self.settle(checkpoint, result)
    }

    /// Write, embellish with the standing request, update memory from the
    /// embellished text, and append it.
    #[instrument(skip_all)]
    pub async fn expand_and_embellish_paragraph(
        &mut self,
        chapter_outline: &str,
        paragraph_outline: &str,
    ) -> AignResult<String> {
        let checkpoint = self.checkpoint();
        let result = self
            .write_embellish_and_absorb(chapter_outline, paragraph_outline)
            .await;
        self.settle(checkpoint, result)
    }

    async fn write_and_absorb(
        &mut self,
        chapter_outline: &str,
        paragraph_outline: &str,
    ) -> AignResult<String> {
        let paragraph = self.write(chapter_outline, paragraph_outline).await?;
        self.memory
            .absorb(&mut self.memory_extractor, &paragraph)
            .await?;

        self.paragraphs.push(paragraph.clone());
        info!(paragraphs = self.paragraphs.len(), "Paragraph generated");
        Ok(paragraph)
    }

    async fn embellish_and_absorb(
        &mut self,
        paragraph: &str,
        embellishment_request: &str,
    ) -> AignResult<String> {
        let embellished = self.embellish(paragraph, embellishment_request).await?;
        self.memory
            .absorb(&mut self.memory_extractor, &embellished)
            .await?;

        if let Some(last) = self.paragraphs.last_mut() {
            if last.as_str() == paragraph {
                debug!("Replacing latest paragraph with embellished text");
                *last = embellished.clone();
            }
        }

        info!("Paragraph embellished");
        Ok(embellished)
    }

    async fn write_embellish_and_absorb(
        &mut self,
        chapter_outline: &str,
        paragraph_outline: &str,
    ) -> AignResult<String> {
        let draft = self.write(chapter_outline, paragraph_outline).await?;
        let idea = self.embellishment_idea.clone();
        let embellished = self.embellish(&draft, &idea).await?;
        self.memory
            .absorb(&mut self.memory_extractor, &embellished)
            .await?;

        self.paragraphs.push(embellished.clone());
        info!(paragraphs = self.paragraphs.len(), "Paragraph written and embellished");
        Ok(embellished)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            outline_expander: self.outline_expander.transcript().clone(),
            writer: self.writer.transcript().clone(),
            embellisher: self.embellisher.transcript().clone(),
            memory_extractor: self.memory_extractor.transcript().clone(),
        }
    }

    /// Roll agent transcripts back to `checkpoint` if the operation failed.
    fn settle(&mut self, checkpoint: Checkpoint, result: AignResult<String>) -> AignResult<String> {
        if result.is_err() {
            debug!("Operation failed, restoring agent transcripts");
            self.outline_expander
                .restore_transcript(checkpoint.outline_expander);
            self.writer.restore_transcript(checkpoint.writer);
            self.embellisher.restore_transcript(checkpoint.embellisher);
            self.memory_extractor
                .restore_transcript(checkpoint.memory_extractor);
        }
        result
    }

    async fn write(&mut self, chapter_outline: &str, paragraph_outline: &str) -> AignResult<String> {
        let context = self.memory.context();
        let sections = self
            .writer
            .invoke(
                &[
                    (prompts::CHAPTER_OUTLINE, chapter_outline),
                    (prompts::PARAGRAPH_OUTLINE, paragraph_outline),
                    (prompts::PRIOR_MEMORY, context.as_str()),
                ],
                &[prompts::PARAGRAPH],
            )
            .await?;
        Ok(required(sections, prompts::PARAGRAPH))
    }

    async fn embellish(&mut self, paragraph: &str, request: &str) -> AignResult<String> {
        let sections = self
            .embellisher
            .invoke(
                &[
                    (prompts::TO_EMBELLISH, paragraph),
                    (prompts::EMBELLISH_REQUEST, request),
                ],
                &[prompts::EMBELLISHED],
            )
            .await?;
        Ok(required(sections, prompts::EMBELLISHED))
    }

    /// Export the narrative memory.
    pub fn memory_snapshot(&self) -> MemorySnapshot {
        self.memory.snapshot()
    }

    /// Replace the narrative memory with an imported snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshotError`](aign_error::MalformedSnapshotError)
    /// if the snapshot is of a different design or fails validation; the
    /// current memory is kept.
    pub fn load_memory_snapshot(&mut self, snapshot: MemorySnapshot) -> AignResult<()> {
        self.memory.restore(snapshot)?;
        info!(strategy = %self.memory.strategy(), "Memory snapshot loaded");
        Ok(())
    }

    /// Current memory context, as handed to the writer.
    pub fn memory_summary(&self) -> String {
        self.memory.context()
    }

    /// The narrative memory.
    pub fn memory(&self) -> &dyn NarrativeMemory {
        self.memory.as_ref()
    }

    /// Accepted paragraphs in order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// The manuscript: accepted paragraphs separated by blank lines.
    pub fn novel_content(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    /// Standing request used by [`expand_and_embellish_paragraph`](Self::expand_and_embellish_paragraph).
    pub fn embellishment_idea(&self) -> &str {
        &self.embellishment_idea
    }

    /// Set the standing embellishment request.
    pub fn set_embellishment_idea(&mut self, idea: impl Into<String>) {
        self.embellishment_idea = idea.into();
    }

    /// Truncate every agent's transcript to its seed turns.
    pub fn reset_agent_memories(&mut self) {
        self.outline_expander.reset_memory();
        self.writer.reset_memory();
        self.embellisher.reset_memory();
        self.memory_extractor.reset_memory();
    }

    /// The paragraph writer agent.
    pub fn writer(&self) -> &ConversationalAgent {
        &self.writer
    }

    /// The embellishment agent.
    pub fn embellisher(&self) -> &ConversationalAgent {
        &self.embellisher
    }
}

/// Agent transcripts as they stood before an operation.
struct Checkpoint {
    outline_expander: Transcript,
    writer: Transcript,
    embellisher: Transcript,
    memory_extractor: Transcript,
}

/// Body of a section the agent already guaranteed.
fn required(mut sections: SectionMap, key: &str) -> String {
    sections.take(key).unwrap_or_default()
}
