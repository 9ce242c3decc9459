//! Workflow command handlers.

use super::Commands;
use aign_error::{AignResult, ConfigError};
use aign_interface::ChatDriver;
use aign_models::OpenAICompatibleClient;
use aign_narrative::{Aign, MemorySnapshot, memory_for};
use aign_retry::AignConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Run one workflow step against the configured provider.
///
/// The snapshot at `snapshot_path`, if it exists, is loaded first; on
/// success the updated memory is written back to the same path.
#[instrument(skip(config))]
pub async fn run_step(
    command: &Commands,
    config: &AignConfig,
    snapshot_path: Option<&Path>,
) -> AignResult<()> {
    let client = OpenAICompatibleClient::from_config(&config.provider)?;
    let driver: Arc<dyn ChatDriver> = Arc::new(client);
    let mut aign = Aign::new(driver, config).await?;

    if let Some(snapshot) = snapshot_path.map(read_snapshot).transpose()?.flatten() {
        aign.load_memory_snapshot(snapshot)?;
    }

    let output = match command {
        Commands::Expand { outline } => aign.expand_outline(outline).await?,
        Commands::Write { chapter, paragraph } => {
            aign.generate_paragraph(chapter, paragraph).await?
        }
        Commands::Embellish { paragraph, request } => {
            aign.embellish_paragraph(paragraph, request).await?
        }
        Commands::Compose {
            chapter,
            paragraph,
            request,
        } => {
            if let Some(request) = request {
                aign.set_embellishment_idea(request.as_str());
            }
            aign.expand_and_embellish_paragraph(chapter, paragraph)
                .await?
        }
        Commands::Memory | Commands::Config => aign.memory_summary(),
    };

    println!("{}", output);

    if let Some(path) = snapshot_path {
        write_snapshot(path, &aign.memory_snapshot())?;
        info!(path = %path.display(), "Memory snapshot saved");
    }

    Ok(())
}

/// Print the narrative memory held in the snapshot, without contacting the model.
pub fn show_memory(config: &AignConfig, snapshot_path: Option<&Path>) -> AignResult<()> {
    println!("{}", render_memory(config, snapshot_path)?);
    Ok(())
}

/// Print the effective configuration.
pub fn print_config(config: &AignConfig) -> AignResult<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn render_memory(config: &AignConfig, snapshot_path: Option<&Path>) -> AignResult<String> {
    let mut memory = memory_for(&config.memory);
    if let Some(snapshot) = snapshot_path.map(read_snapshot).transpose()?.flatten() {
        memory.restore(snapshot)?;
    }
    Ok(memory.context())
}

/// A missing file means no memory yet.
fn read_snapshot(path: &Path) -> AignResult<Option<MemorySnapshot>> {
    if !path.exists() {
        debug!(path = %path.display(), "No snapshot yet");
        return Ok(None);
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!(
            "Failed to read snapshot {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Some(MemorySnapshot::from_json(&json)?))
}

fn write_snapshot(path: &Path, snapshot: &MemorySnapshot) -> AignResult<()> {
    let json = snapshot.to_json()?;
    std::fs::write(path, json).map_err(|e| {
        ConfigError::new(format!(
            "Failed to write snapshot {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aign_retry::MemoryStrategy;

    fn config(strategy: MemoryStrategy, premise: &str) -> AignConfig {
        let mut config = AignConfig::bundled().unwrap();
        config.memory.strategy = strategy;
        config.memory.premise = premise.to_string();
        config
    }

    #[test]
    fn test_missing_snapshot_is_empty_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");

        let rendered =
            render_memory(&config(MemoryStrategy::RollingSummary, "前提"), Some(&path)).unwrap();

        assert_eq!(rendered, "前提");
        assert!(read_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let snapshot = MemorySnapshot::RollingSummary {
            premise: "前提".into(),
            summaries: vec!["一".into(), "二".into(), "三".into(), "四".into()],
        };

        write_snapshot(&path, &snapshot).unwrap();

        assert_eq!(read_snapshot(&path).unwrap(), Some(snapshot));
        let rendered =
            render_memory(&config(MemoryStrategy::RollingSummary, ""), Some(&path)).unwrap();
        assert_eq!(rendered, "前提\n二\n三\n四");
    }

    #[test]
    fn test_snapshot_of_other_strategy_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let snapshot = MemorySnapshot::RollingSummary {
            premise: String::new(),
            summaries: Vec::new(),
        };
        write_snapshot(&path, &snapshot).unwrap();

        let result = render_memory(&config(MemoryStrategy::EntityGraph, ""), Some(&path));

        assert!(result.is_err());
    }

    #[test]
    fn test_corrupt_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(read_snapshot(&path).is_err());
    }

    #[test]
    fn test_config_renders_as_toml() {
        let config = config(MemoryStrategy::EntityGraph, "");
        let rendered = toml::to_string_pretty(&config).unwrap();

        assert!(rendered.contains("[provider]"));
        assert!(rendered.contains("strategy = \"entity_graph\""));
    }
}
