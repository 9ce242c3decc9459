//! Entity-graph narrative memory.

use crate::memory::{MemorySnapshot, NarrativeMemory};
use crate::{CharacterPair, ConversationalAgent, Extraction, parse_extraction, prompts};
use aign_error::{AignResult, ExtractionError, MalformedSnapshotError};
use aign_retry::MemoryStrategy;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{debug, instrument};

/// Character statuses and pairwise relationships.
///
/// Both maps are last-write-wins. Relationship keys are [`CharacterPair`]s,
/// so the order names are given in never matters.
///
/// # Examples
///
/// ```
/// use aign_narrative::EntityGraphMemory;
///
/// let mut memory = EntityGraphMemory::new();
/// memory.update_character("Alice", "asleep");
/// memory.update_character("Alice", "awake");
/// memory.update_relationship("Bob", "Alice", "siblings").unwrap();
///
/// assert_eq!(memory.character_status("Alice"), Some("awake"));
/// assert_eq!(memory.relationship("Alice", "Bob"), Some("siblings"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityGraphMemory {
    characters: BTreeMap<String, String>,
    relationships: BTreeMap<CharacterPair, String>,
}

impl EntityGraphMemory {
    /// Empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a character's status, replacing any earlier one.
    ///
    /// The name is trimmed, matching the key [`CharacterPair`] uses.
    pub fn update_character(&mut self, name: impl AsRef<str>, status: impl Into<String>) {
        self.characters
            .insert(name.as_ref().trim().to_string(), status.into());
    }

    /// Record the relationship between two characters, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Rejects blank names and a character paired with itself.
    pub fn update_relationship(
        &mut self,
        a: &str,
        b: &str,
        relation: impl Into<String>,
    ) -> Result<(), ExtractionError> {
        let pair = CharacterPair::new(a, b)?;
        self.relationships.insert(pair, relation.into());
        Ok(())
    }

    /// Current status of a character.
    pub fn character_status(&self, name: &str) -> Option<&str> {
        self.characters.get(name).map(String::as_str)
    }

    /// Current relationship between two characters, in either order.
    pub fn relationship(&self, a: &str, b: &str) -> Option<&str> {
        let pair = CharacterPair::new(a, b).ok()?;
        self.relationships.get(&pair).map(String::as_str)
    }

    /// All character statuses by name.
    pub fn characters(&self) -> &BTreeMap<String, String> {
        &self.characters
    }

    /// All relationships by pair.
    pub fn relationships(&self) -> &BTreeMap<CharacterPair, String> {
        &self.relationships
    }

    /// Render every status and relationship for inclusion in a prompt.
    pub fn summary(&self) -> String {
        let mut summary = String::from("当前人物状态：\n");
        for (character, status) in &self.characters {
            let _ = writeln!(summary, "{}: {}", character, status);
        }

        summary.push_str("\n人物关系：\n");
        for (pair, relation) in &self.relationships {
            let _ = writeln!(summary, "{} 的关系: {}", pair, relation);
        }

        summary
    }

    /// Apply a validated extraction. Cannot fail.
    pub fn merge(&mut self, extraction: Extraction) {
        for (name, status) in extraction.characters {
            self.update_character(name, status);
        }
        for (pair, relation) in extraction.relationships {
            self.relationships.insert(pair, relation);
        }
    }

    /// Parse an extraction reply and merge it.
    ///
    /// The payload is validated in full before anything is written, so a
    /// malformed reply leaves the memory exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] if the payload is missing, malformed, or
    /// contains an invalid entry.
    #[instrument(skip_all, fields(text_length = raw_extraction.len()))]
    pub fn extract_and_merge(&mut self, raw_extraction: &str) -> Result<(), ExtractionError> {
        let extraction = parse_extraction(raw_extraction)?;
        debug!(
            characters = extraction.characters.len(),
            relationships = extraction.relationships.len(),
            "Merging extraction"
        );
        self.merge(extraction);
        Ok(())
    }
}

#[async_trait]
impl NarrativeMemory for EntityGraphMemory {
    fn strategy(&self) -> MemoryStrategy {
        MemoryStrategy::EntityGraph
    }

    fn extractor_prompt(&self) -> &'static str {
        prompts::ENTITY_EXTRACTOR
    }

    fn context(&self) -> String {
        self.summary()
    }

    async fn absorb(&mut self, extractor: &mut ConversationalAgent, passage: &str) -> AignResult<()> {
        // a payload that fails validation is resampled like a missing section
        let (_, extraction) = extractor
            .invoke_validated(
                &[(prompts::PASSAGE, passage)],
                &[prompts::CHARACTERS_AND_RELATIONSHIPS],
                |sections| {
                    parse_extraction(
                        sections
                            .get(prompts::CHARACTERS_AND_RELATIONSHIPS)
                            .unwrap_or_default(),
                    )
                },
            )
            .await?;

        self.merge(extraction);
        debug!(
            characters = self.characters.len(),
            relationships = self.relationships.len(),
            "Entity memory updated"
        );
        Ok(())
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot::EntityGraph {
            characters: self.characters.clone(),
            relationships: self
                .relationships
                .iter()
                .map(|(pair, relation)| (pair.clone(), relation.clone()))
                .collect(),
        }
    }

    fn restore(&mut self, snapshot: MemorySnapshot) -> Result<(), MalformedSnapshotError> {
        let (characters, relationships) = match snapshot {
            MemorySnapshot::EntityGraph {
                characters,
                relationships,
            } => (characters, relationships),
            other => {
                return Err(MalformedSnapshotError::new(format!(
                    "expected an entity_graph snapshot, got {}",
                    other.strategy()
                )));
            }
        };

        let mut restored = BTreeMap::new();
        for (pair, relation) in relationships {
            if restored.contains_key(&pair) {
                return Err(MalformedSnapshotError::new(format!(
                    "duplicate relationship entry for {}",
                    pair
                )));
            }
            restored.insert(pair, relation);
        }

        self.characters = characters;
        self.relationships = restored;
        Ok(())
    }

    fn as_entity_graph(&self) -> Option<&EntityGraphMemory> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_last_write_wins() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character("Alice", "A");
        memory.update_character("Alice", "B");

        assert_eq!(memory.character_status("Alice"), Some("B"));
        assert_eq!(memory.characters().len(), 1);
    }

    #[test]
    fn test_character_name_is_trimmed() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character(" Alice ", "awake");
        memory.update_character("Alice", "asleep");

        assert_eq!(memory.character_status("Alice"), Some("asleep"));
        assert_eq!(memory.characters().len(), 1);
    }

    #[test]
    fn test_relationship_order_insensitive() {
        let mut memory = EntityGraphMemory::new();
        memory
            .update_relationship("Alice", "Bob", "strangers")
            .expect("valid pair");
        memory
            .update_relationship("Bob", "Alice", "friends")
            .expect("valid pair");

        assert_eq!(memory.relationships().len(), 1);
        assert_eq!(memory.relationship("Alice", "Bob"), Some("friends"));
        assert_eq!(memory.relationship("Bob", "Alice"), Some("friends"));
    }

    #[test]
    fn test_unknown_lookups_are_none() {
        let memory = EntityGraphMemory::new();
        assert_eq!(memory.character_status("Nobody"), None);
        assert_eq!(memory.relationship("Alice", "Alice"), None);
    }

    #[test]
    fn test_summary_layout() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character("Alice", "awake");
        memory
            .update_relationship("Bob", "Alice", "siblings")
            .expect("valid pair");

        assert_eq!(
            memory.summary(),
            "当前人物状态：\nAlice: awake\n\n人物关系：\nAlice 和 Bob 的关系: siblings\n"
        );
    }

    #[test]
    fn test_malformed_extraction_leaves_state() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character("Alice", "awake");
        let before = memory.clone();

        let bad = r#"{"characters": {"Alice": "asleep", "Bob": ""}}"#;
        assert!(memory.extract_and_merge(bad).is_err());
        assert_eq!(memory, before);

        assert!(memory.extract_and_merge("not json at all").is_err());
        assert_eq!(memory, before);
    }

    #[test]
    fn test_extract_and_merge_overwrites() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character("Alice", "awake");

        memory
            .extract_and_merge(
                r#"{"characters": {"Alice": "running"}, "relationships": [{"characters": ["Bob", "Alice"], "relation": "rivals"}]}"#,
            )
            .expect("valid payload");

        assert_eq!(memory.character_status("Alice"), Some("running"));
        assert_eq!(memory.relationship("Alice", "Bob"), Some("rivals"));
    }

    #[test]
    fn test_restore_rejects_duplicate_pairs() {
        let mut memory = EntityGraphMemory::new();
        memory.update_character("Carol", "kept");
        let pair = CharacterPair::new("Alice", "Bob").expect("valid pair");
        let snapshot = MemorySnapshot::EntityGraph {
            characters: BTreeMap::new(),
            relationships: vec![(pair.clone(), "x".into()), (pair, "y".into())],
        };

        assert!(memory.restore(snapshot).is_err());
        assert_eq!(memory.character_status("Carol"), Some("kept"));
    }
}
