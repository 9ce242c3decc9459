//! Exportable narrative memory state.

use crate::CharacterPair;
use aign_error::{AignResult, JsonError, MalformedSnapshotError};
use aign_retry::MemoryStrategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw contents of a narrative memory, tagged by design.
///
/// JSON layout:
///
/// ```json
/// {"strategy": "rolling_summary", "premise": "...", "summaries": ["...", "..."]}
/// {"strategy": "entity_graph",
///  "characters": {"Alice": "..."},
///  "relationships": [[["Alice", "Bob"], "..."]]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MemorySnapshot {
    /// Premise plus every recorded summary, oldest first
    RollingSummary {
        /// Global premise
        premise: String,
        /// Recorded summaries in order
        summaries: Vec<String>,
    },
    /// Character statuses and relationships
    EntityGraph {
        /// Character name to status
        characters: BTreeMap<String, String>,
        /// `[pair, relation]` entries
        relationships: Vec<(CharacterPair, String)>,
    },
}

impl MemorySnapshot {
    /// Which memory design produced this snapshot.
    pub fn strategy(&self) -> MemoryStrategy {
        match self {
            Self::RollingSummary { .. } => MemoryStrategy::RollingSummary,
            Self::EntityGraph { .. } => MemoryStrategy::EntityGraph,
        }
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`] if serialization fails.
    pub fn to_json(&self) -> AignResult<String> {
        Ok(serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize snapshot: {}", e)))?)
    }

    /// Parse a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshotError`] when the document is not valid
    /// JSON, has an unknown strategy, lacks a field, or contains an invalid
    /// character pair.
    pub fn from_json(json: &str) -> Result<Self, MalformedSnapshotError> {
        serde_json::from_str(json).map_err(|e| {
            tracing::error!(error = %e, "Snapshot rejected");
            MalformedSnapshotError::new(e.to_string())
        })
    }
}
