//! Configuration structures for AIGN.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from aign.toml)
//! - User overrides (~/.config/aign/aign.toml, then ./aign.toml)
//!
//! Later sources override earlier ones key by key, so an override file only
//! needs the values it changes.

use crate::RetryPolicy;
use aign_core::SamplingParams;
use aign_error::{AignResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../aign.toml");

/// Chat-completion endpoint settings.
///
/// The API key itself is never stored in configuration; `api_key_env` names
/// the environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider label used in logs (e.g., "zhipu")
    pub name: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Optional completion length cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Retry settings, see [`RetryPolicy`].
///
/// ```toml
/// [retry]
/// max_attempts = 10
/// backoff_ms = 2333
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts per invocation
    pub max_attempts: u32,
    /// Fixed pause between attempts, in milliseconds
    pub backoff_ms: u64,
}

impl RetryConfig {
    /// Build the validated policy.
    pub fn policy(&self) -> Result<RetryPolicy, ConfigError> {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.backoff_ms))
    }
}

/// Which narrative memory design an orchestrator uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MemoryStrategy {
    /// Global premise plus a window of recent plot summaries
    RollingSummary,
    /// Character statuses and pairwise relationships
    #[default]
    EntityGraph,
}

/// Narrative memory settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Memory design
    #[serde(default)]
    pub strategy: MemoryStrategy,
    /// Global premise for the rolling-summary design
    #[serde(default)]
    pub premise: String,
}

/// Per-agent sampling and seeding settings.
///
/// ```toml
/// [agents.writer]
/// temperature = 0.81
/// top_p = 0.8
/// use_memory = false
/// acknowledgement = "明白了。"
/// ```
///
/// Omitting `acknowledgement` makes the agent ask the model for its opening
/// reply at construction time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AgentSettings {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Carry the transcript across calls
    #[serde(default)]
    pub use_memory: bool,
    /// Fixed seed reply; `None` asks the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<String>,
    /// Replacement for the built-in role prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl AgentSettings {
    /// Sampling parameters sent with every call.
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams::new(self.temperature, self.top_p)
    }

    #[track_caller]
    fn validate(&self, role: &str) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::new(format!(
                "agents.{}.temperature must be within 0.0..=2.0, got {}",
                role, self.temperature
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::new(format!(
                "agents.{}.top_p must be within (0.0, 1.0], got {}",
                role, self.top_p
            )));
        }
        Ok(())
    }
}

/// Settings for each agent role.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AgentsConfig {
    /// Outline expansion agent
    pub outline_expander: AgentSettings,
    /// Paragraph writer agent
    pub writer: AgentSettings,
    /// Embellishment agent
    pub embellisher: AgentSettings,
    /// Memory extraction agent
    pub memory_extractor: AgentSettings,
}

/// Top-level AIGN configuration.
///
/// # Example
///
/// ```no_run
/// use aign_retry::AignConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AignConfig::load()?;
/// println!("Writing with {} via {}", config.provider.model, config.provider.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AignConfig {
    /// Chat-completion endpoint
    pub provider: ProviderConfig,
    /// Retry settings
    pub retry: RetryConfig,
    /// Narrative memory settings
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Agent settings
    pub agents: AgentsConfig,
}

impl AignConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is invalid.
    pub fn bundled() -> AignResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the result
    /// fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AignResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::build(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse, or the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load() -> AignResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/aign/aign.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("aign").required(false));

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> AignResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::new("provider.base_url must not be empty"));
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::new("provider.model must not be empty"));
        }
        self.retry.policy()?;

        self.agents.outline_expander.validate("outline_expander")?;
        self.agents.writer.validate("writer")?;
        self.agents.embellisher.validate("embellisher")?;
        self.agents.memory_extractor.validate("memory_extractor")?;

        Ok(())
    }
}
