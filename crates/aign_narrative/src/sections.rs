//! Section parsing for markdown-style model replies.
//!
//! A reply is split into named sections: a line whose first non-space
//! character is `#` opens a section named by the rest of the line, and every
//! following line up to the next heading belongs to that section's body.
//! Text before the first heading is discarded.

use aign_error::{SectionFailure, SectionParseError};
use std::collections::BTreeMap;

/// Heading marker.
pub const SECTION_MARKER: char = '#';

/// Canonical form of a section name: trimmed, inner whitespace collapsed to
/// single spaces, lower-cased.
///
/// # Examples
///
/// ```
/// use aign_narrative::normalize_section_name;
///
/// assert_eq!(normalize_section_name("  Plot   Summary "), "plot summary");
/// assert_eq!(normalize_section_name("段落"), "段落");
/// ```
pub fn normalize_section_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parsed mapping from section name to trimmed body.
///
/// # Examples
///
/// ```
/// use aign_narrative::SectionMap;
///
/// let sections = SectionMap::parse("intro text\n# 段落\nOnce upon a time.\n");
/// assert_eq!(sections.get("段落"), Some("Once upon a time."));
/// assert_eq!(sections.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<String, String>,
}

impl SectionMap {
    /// Parse every section without checking for required names.
    pub fn parse(raw: &str) -> Self {
        let mut bodies: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with(SECTION_MARKER) {
                let name = normalize_section_name(trimmed.trim_start_matches(SECTION_MARKER));
                // a repeated heading continues the earlier body
                bodies.entry(name.clone()).or_default();
                current = Some(name);
            } else if let Some(name) = &current {
                bodies.entry(name.clone()).or_default().push(trimmed);
            }
        }

        let sections = bodies
            .into_iter()
            .map(|(name, lines)| (name, lines.join("\n").trim().to_string()))
            .collect();

        Self { sections }
    }

    /// Parse and require every name in `required` to have a non-empty body.
    ///
    /// # Errors
    ///
    /// Returns [`SectionParseError`] for the first required name that is
    /// missing or blank. No partial map is returned.
    pub fn parse_required(raw: &str, required: &[&str]) -> Result<Self, SectionParseError> {
        let sections = Self::parse(raw);
        for key in required {
            match sections.get(key) {
                None => return Err(SectionParseError::new(*key, SectionFailure::Missing, raw)),
                Some("") => return Err(SectionParseError::new(*key, SectionFailure::Empty, raw)),
                Some(_) => {}
            }
        }
        Ok(sections)
    }

    /// Body of a section, looked up by normalized name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections
            .get(&normalize_section_name(name))
            .map(String::as_str)
    }

    /// Remove and return a section body.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.sections.remove(&normalize_section_name(name))
    }

    /// Whether a section with this name was present.
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(&normalize_section_name(name))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section was found.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate sections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
    }
}
