//! Unordered character pair used as a relationship key.

use aign_error::{ExtractionError, ExtractionErrorKind};
use serde::{Deserialize, Serialize};

/// Two distinct character names stored in lexicographic order.
///
/// `CharacterPair::new("Bob", "Alice")` and `CharacterPair::new("Alice", "Bob")`
/// are the same key.
///
/// # Examples
///
/// ```
/// use aign_narrative::CharacterPair;
///
/// let pair = CharacterPair::new("Bob", "Alice").unwrap();
/// assert_eq!(pair.first(), "Alice");
/// assert_eq!(pair, CharacterPair::new("Alice", "Bob").unwrap());
/// assert!(CharacterPair::new("Alice", " Alice ").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "[String; 2]", into = "[String; 2]")]
#[display("{} 和 {}", first, second)]
pub struct CharacterPair {
    first: String,
    second: String,
}

impl CharacterPair {
    /// Canonicalise two names into a pair.
    ///
    /// # Errors
    ///
    /// Names are trimmed; a blank name or a name paired with itself is rejected.
    #[track_caller]
    pub fn new(a: impl AsRef<str>, b: impl AsRef<str>) -> Result<Self, ExtractionError> {
        let a = a.as_ref().trim();
        let b = b.as_ref().trim();
        if a.is_empty() || b.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::BlankName));
        }
        if a == b {
            return Err(ExtractionError::new(ExtractionErrorKind::SelfRelationship(
                a.to_string(),
            )));
        }
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self {
            first: first.to_string(),
            second: second.to_string(),
        })
    }

    /// Lexicographically smaller name.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger name.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether `name` is one of the two.
    pub fn involves(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl TryFrom<[String; 2]> for CharacterPair {
    type Error = ExtractionError;

    fn try_from([a, b]: [String; 2]) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<CharacterPair> for [String; 2] {
    fn from(pair: CharacterPair) -> Self {
        [pair.first, pair.second]
    }
}
