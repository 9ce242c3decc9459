//! Extraction of character and relationship facts from model output.
//!
//! The memory-extraction agent is asked for a JSON object of the form
//!
//! ```json
//! {
//!   "characters": {"角色A": "状态描述"},
//!   "relationships": [{"characters": ["角色A", "角色B"], "relation": "关系描述"}]
//! }
//! ```
//!
//! The payload is located inside the reply (fenced block or first balanced
//! object), deserialized against a closed schema, then validated. Nothing is
//! ever evaluated.

use crate::CharacterPair;
use aign_error::{ExtractionError, ExtractionErrorKind};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw payload as produced by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionPayload {
    /// Character name to current status
    #[serde(default)]
    pub characters: BTreeMap<String, String>,
    /// Pairwise relationships
    #[serde(default)]
    pub relationships: Vec<RelationshipEntry>,
}

/// One relationship in a payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationshipEntry {
    /// The two characters involved, in any order
    pub characters: [String; 2],
    /// Description of the relationship
    pub relation: String,
}

/// A payload that passed validation and can be merged without failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Trimmed character statuses
    pub characters: Vec<(String, String)>,
    /// Canonicalised relationships
    pub relationships: Vec<(CharacterPair, String)>,
}

impl Extraction {
    /// Whether the payload named nothing.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.relationships.is_empty()
    }
}

impl ExtractionPayload {
    /// Check every entry, producing a merge-ready [`Extraction`].
    ///
    /// # Errors
    ///
    /// Fails on the first blank name, blank description or self-relationship.
    pub fn validate(self) -> Result<Extraction, ExtractionError> {
        let mut characters = Vec::with_capacity(self.characters.len());
        for (name, status) in self.characters {
            let name = name.trim();
            if name.is_empty() {
                return Err(ExtractionError::new(ExtractionErrorKind::BlankName));
            }
            let status = status.trim();
            if status.is_empty() {
                return Err(ExtractionError::new(ExtractionErrorKind::BlankValue(
                    name.to_string(),
                )));
            }
            characters.push((name.to_string(), status.to_string()));
        }

        let mut relationships = Vec::with_capacity(self.relationships.len());
        for entry in self.relationships {
            let pair = CharacterPair::try_from(entry.characters)?;
            let relation = entry.relation.trim();
            if relation.is_empty() {
                return Err(ExtractionError::new(ExtractionErrorKind::BlankValue(
                    pair.to_string(),
                )));
            }
            relationships.push((pair, relation.to_string()));
        }

        Ok(Extraction {
            characters,
            relationships,
        })
    }
}

/// Locate, deserialize and validate an extraction payload.
///
/// # Errors
///
/// - [`ExtractionErrorKind::NoPayload`] when no JSON object is present
/// - [`ExtractionErrorKind::InvalidPayload`] when it does not match the schema
/// - validation failures from [`ExtractionPayload::validate`]
///
/// # Examples
///
/// ```
/// use aign_narrative::parse_extraction;
///
/// let reply = r#"```json
/// {"characters": {"Alice": "brave"}, "relationships": []}
/// ```"#;
/// let extraction = parse_extraction(reply).unwrap();
/// assert_eq!(extraction.characters, vec![("Alice".to_string(), "brave".to_string())]);
/// ```
pub fn parse_extraction(text: &str) -> Result<Extraction, ExtractionError> {
    let json = extract_json_object(text).ok_or_else(|| {
        tracing::error!(text_length = text.len(), "No JSON object found in extraction");
        ExtractionError::new(ExtractionErrorKind::NoPayload(text.len()))
    })?;

    let payload: ExtractionPayload = serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::error!(error = %e, json_preview = %preview, "Extraction payload rejected");
        ExtractionError::new(ExtractionErrorKind::InvalidPayload(e.to_string()))
    })?;

    payload.validate()
}

/// Find a JSON object in free text.
///
/// Tries a fenced code block first, then the first balanced `{ ... }`.
fn extract_json_object(text: &str) -> Option<String> {
    if let Some(block) = extract_from_code_block(text) {
        if let Some(object) = extract_balanced(&block, '{', '}') {
            return Some(object);
        }
    }
    extract_balanced(text, '{', '}')
}

/// Content of the first fenced code block, with any language tag dropped.
fn extract_from_code_block(text: &str) -> Option<String> {
    let start = text.find("```")?;
    let after_fence = start + 3;
    let content_start = text[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    match text[content_start..].find("```") {
        Some(end) => Some(text[content_start..content_start + end].trim().to_string()),
        // unterminated fence, likely a truncated reply
        None => Some(text[content_start..].trim().to_string()),
    }
}

/// Content between the first `open` and its matching `close`, skipping
/// delimiters inside string literals.
fn extract_balanced(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
