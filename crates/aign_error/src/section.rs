//! Structured response parsing errors.

/// Why a required section was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SectionFailure {
    /// No heading with the required name
    #[display("missing")]
    Missing,
    /// Heading present but its body is blank
    #[display("empty")]
    Empty,
}

/// A model reply lacked a required `# heading` section or left it blank.
///
/// Carries the raw reply so the failure can be logged before the call is
/// resampled; `Display` includes a preview of it.
///
/// # Examples
///
/// ```
/// use aign_error::{SectionFailure, SectionParseError};
///
/// let err = SectionParseError::new("段落", SectionFailure::Missing, "no headings here");
/// assert_eq!(err.key, "段落");
/// assert!(format!("{}", err).contains("missing"));
/// assert!(format!("{}", err).contains("no headings here"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct SectionParseError {
    /// Name of the offending section
    pub key: String,
    /// Whether the section was absent or blank
    pub failure: SectionFailure,
    /// Unmodified model output
    pub raw_output: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

/// Characters of raw output shown by [`SectionParseError::raw_preview`].
pub const RAW_PREVIEW_CHARS: usize = 200;

impl SectionParseError {
    /// Create a new SectionParseError at the current location.
    #[track_caller]
    pub fn new(key: impl Into<String>, failure: SectionFailure, raw_output: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            key: key.into(),
            failure,
            raw_output: raw_output.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The first [`RAW_PREVIEW_CHARS`] characters of the raw output, with
    /// `...` appended when it was cut.
    pub fn raw_preview(&self) -> String {
        let mut chars = self.raw_output.chars();
        let mut preview: String = chars.by_ref().take(RAW_PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            preview.push_str("...");
        }
        preview
    }
}

impl std::fmt::Display for SectionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Section Parse Error: section '{}' is {} (output: {:?}) at line {} in {}",
            self.key,
            self.failure,
            self.raw_preview(),
            self.line,
            self.file
        )
    }
}
