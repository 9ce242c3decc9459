//! CLI command definitions.

use aign_error::AignResult;
use aign_retry::AignConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AIGN - AI-assisted novel writing with narrative memory
#[derive(Parser, Debug)]
#[command(name = "aign")]
#[command(about = "AI-assisted novel writing with narrative memory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (replaces ~/.config/aign/aign.toml and ./aign.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Memory snapshot: loaded before the command if present, saved after it
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Load `--config` if given, else the layered defaults.
    pub fn load_config(&self) -> AignResult<AignConfig> {
        match &self.config {
            Some(path) => AignConfig::from_file(path),
            None => AignConfig::load(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Expand a rough outline into a detailed one
    Expand {
        /// The rough outline
        #[arg(long)]
        outline: String,
    },

    /// Write the next paragraph and remember it
    Write {
        /// Outline of the current chapter
        #[arg(long)]
        chapter: String,

        /// Outline of the paragraph to write
        #[arg(long)]
        paragraph: String,
    },

    /// Embellish a passage and remember the result
    Embellish {
        /// The passage to embellish
        #[arg(long)]
        paragraph: String,

        /// How to embellish it
        #[arg(long, default_value = "")]
        request: String,
    },

    /// Write a paragraph, embellish it, and remember the embellished text
    Compose {
        /// Outline of the current chapter
        #[arg(long)]
        chapter: String,

        /// Outline of the paragraph to write
        #[arg(long)]
        paragraph: String,

        /// Embellishment request
        #[arg(long)]
        request: Option<String>,
    },

    /// Print the current narrative memory
    Memory,

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write() {
        let cli = Cli::try_parse_from([
            "aign",
            "write",
            "--chapter",
            "第一章",
            "--paragraph",
            "出发",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Write {
                chapter: "第一章".into(),
                paragraph: "出发".into(),
            }
        );
        assert!(cli.snapshot.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aign",
            "compose",
            "--chapter",
            "c",
            "--paragraph",
            "p",
            "--snapshot",
            "memory.json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.snapshot, Some(PathBuf::from("memory.json")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Compose { request: None, .. }));
    }

    #[test]
    fn test_embellish_request_defaults_empty() {
        let cli = Cli::try_parse_from(["aign", "embellish", "--paragraph", "text"]).unwrap();

        assert_eq!(
            cli.command,
            Commands::Embellish {
                paragraph: "text".into(),
                request: String::new(),
            }
        );
    }

    #[test]
    fn test_missing_argument_rejected() {
        assert!(Cli::try_parse_from(["aign", "write", "--chapter", "c"]).is_err());
        assert!(Cli::try_parse_from(["aign", "expand"]).is_err());
    }
}
