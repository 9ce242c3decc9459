//! Conversational agent: a fixed role bound to the structured call protocol.

use crate::{SectionMap, StructuredReply, call_structured};
use aign_core::{CompletionRequest, CompletionRequestBuilder, Message, SamplingParams, Transcript};
use aign_error::{AignError, AignResult, TransportError, TransportErrorKind};
use aign_interface::ChatDriver;
use aign_retry::{AgentSettings, RetryPolicy, retry};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Render labelled inputs as one user turn.
///
/// Each non-empty value becomes `# label\nvalue\n\n`; empty values are
/// skipped entirely.
///
/// # Examples
///
/// ```
/// use aign_narrative::compose_prompt;
///
/// let prompt = compose_prompt(&[("章节大纲", "出发"), ("前文记忆", "")]);
/// assert_eq!(prompt, "# 章节大纲\n出发\n\n");
/// ```
pub fn compose_prompt(inputs: &[(&str, &str)]) -> String {
    inputs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("# {}\n{}\n\n", label, value))
        .collect()
}

/// A role-specific agent with optional conversational memory.
///
/// The transcript starts as the system prompt (sent as a user turn) and an
/// acknowledgement. With memory enabled, each successful invocation appends
/// its user turn and raw reply; failed attempts never touch the transcript.
#[derive(derive_getters::Getters)]
pub struct ConversationalAgent {
    /// Name used in logs and retry errors
    name: String,
    #[getter(skip)]
    driver: Arc<dyn ChatDriver>,
    /// Sampling parameters sent with every call
    sampling: SamplingParams,
    /// Whether the transcript grows across calls
    use_memory: bool,
    /// Conversation context sent before each new turn
    transcript: Transcript,
    /// Retry budget for each invocation
    policy: RetryPolicy,
}

impl std::fmt::Debug for ConversationalAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationalAgent")
            .field("name", &self.name)
            .field("model", &self.driver.model_name())
            .field("sampling", &self.sampling)
            .field("use_memory", &self.use_memory)
            .field("turns", &self.transcript.len())
            .finish()
    }
}

impl ConversationalAgent {
    /// Create an agent and seed its transcript.
    ///
    /// With `settings.acknowledgement` set, the seed is built locally. Without
    /// it, the model is asked to answer the system prompt and its reply becomes
    /// the acknowledgement; that call is retried like any other.
    ///
    /// # Errors
    ///
    /// Returns [`ExhaustedRetriesError`](aign_error::ExhaustedRetriesError) if
    /// the greeting call never succeeds.
    #[instrument(skip(driver, system_prompt, settings, policy), fields(model = driver.model_name()))]
    pub async fn create(
        name: &str,
        driver: Arc<dyn ChatDriver>,
        system_prompt: &str,
        settings: &AgentSettings,
        policy: RetryPolicy,
    ) -> AignResult<Self> {
        let sampling = settings.sampling();

        let acknowledgement = match &settings.acknowledgement {
            Some(ack) => ack.clone(),
            None => {
                debug!("Requesting model-authored acknowledgement");
                let request = build_request(vec![Message::user(system_prompt)], sampling)?;
                let driver_ref = driver.as_ref();
                let request = &request;
                retry(&policy, name, || async move {
                    let response = driver_ref.complete(request).await?;
                    let content = response.into_content();
                    if content.trim().is_empty() {
                        return Err(AignError::from(TransportError::new(
                            TransportErrorKind::EmptyResponse,
                        )));
                    }
                    Ok(content)
                })
                .await?
            }
        };

        info!(use_memory = settings.use_memory, "Agent ready");

        Ok(Self {
            name: name.to_string(),
            driver,
            sampling,
            use_memory: settings.use_memory,
            transcript: Transcript::seeded(system_prompt, acknowledgement),
            policy,
        })
    }

    /// Send labelled inputs and return the reply's sections.
    ///
    /// Every name in `required_keys` is guaranteed to be present with a
    /// non-empty body. Transport failures and malformed replies are retried
    /// up to the policy's cap.
    ///
    /// # Errors
    ///
    /// Returns [`ExhaustedRetriesError`](aign_error::ExhaustedRetriesError)
    /// once every attempt has failed.
    pub async fn invoke(
        &mut self,
        inputs: &[(&str, &str)],
        required_keys: &[&str],
    ) -> AignResult<SectionMap> {
        let (sections, ()) = self
            .invoke_validated(inputs, required_keys, |_| Ok::<_, AignError>(()))
            .await?;
        Ok(sections)
    }

    /// Like [`invoke`](Self::invoke), with an extra check run on each
    /// attempt's sections.
    ///
    /// A `validate` failure is treated like a missing section: the call is
    /// resampled. The first attempt that passes both the section check and
    /// `validate` wins, and its validated value is returned alongside the
    /// sections.
    #[instrument(skip_all, fields(agent = %self.name, inputs = inputs.len()))]
    pub async fn invoke_validated<T, E, V>(
        &mut self,
        inputs: &[(&str, &str)],
        required_keys: &[&str],
        validate: V,
    ) -> AignResult<(SectionMap, T)>
    where
        V: Fn(&SectionMap) -> Result<T, E>,
        E: Into<AignError>,
    {
        let prompt = compose_prompt(inputs);
        let request = build_request(
            self.transcript.extended_with(Message::user(prompt.clone())),
            self.sampling,
        )?;

        let driver = self.driver.as_ref();
        let request = &request;
        let validate = &validate;
        let (reply, value) = retry(&self.policy, &self.name, || async move {
            let reply: StructuredReply = call_structured(driver, request, required_keys).await?;
            let value = validate(reply.sections()).map_err(|e| -> AignError { e.into() })?;
            Ok::<_, AignError>((reply, value))
        })
        .await?;

        let (sections, raw, _usage) = reply.dissolve();
        if self.use_memory {
            self.transcript.push(Message::user(prompt));
            self.transcript.push(Message::assistant(raw));
        }

        debug!(turns = self.transcript.len(), "Invocation complete");
        Ok((sections, value))
    }

    /// Truncate the transcript back to its two seed turns.
    pub fn reset_memory(&mut self) {
        self.transcript.truncate_to_seed();
        debug!(agent = %self.name, "Agent memory cleared");
    }

    /// Put back a transcript taken before a failed operation.
    pub(crate) fn restore_transcript(&mut self, transcript: Transcript) {
        self.transcript = transcript;
    }
}

fn build_request(messages: Vec<Message>, sampling: SamplingParams) -> AignResult<CompletionRequest> {
    CompletionRequestBuilder::default()
        .messages(messages)
        .temperature(sampling.temperature)
        .top_p(sampling.top_p)
        .build()
        .map_err(|e| {
            TransportError::new(TransportErrorKind::InvalidRequest(format!(
                "Failed to build request: {}",
                e
            )))
            .into()
        })
}
