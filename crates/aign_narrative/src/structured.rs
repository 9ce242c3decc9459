//! Single structured call: one completion, parsed into sections.

use crate::SectionMap;
use aign_core::{CompletionRequest, TokenUsage};
use aign_error::AignResult;
use aign_interface::ChatDriver;
use tracing::{debug, instrument, warn};

/// A reply that carried every required section.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_getters::Dissolve)]
pub struct StructuredReply {
    /// Parsed sections
    sections: SectionMap,
    /// Unmodified model output
    raw: String,
    /// Token accounting, when reported
    usage: Option<TokenUsage>,
}

/// Send `request` once and parse the reply.
///
/// No retry happens here; wrap the call in [`aign_retry::retry`] to resample
/// on failure.
///
/// # Errors
///
/// Returns the transport error unchanged, or a
/// [`SectionParseError`](aign_error::SectionParseError) naming the first
/// required section that is missing or blank.
#[instrument(skip_all, fields(model = driver.model_name(), turns = request.messages.len()))]
pub async fn call_structured(
    driver: &dyn ChatDriver,
    request: &CompletionRequest,
    required_keys: &[&str],
) -> AignResult<StructuredReply> {
    let response = driver.complete(request).await?;
    let usage = *response.usage();
    let raw = response.into_content();

    let sections = SectionMap::parse_required(&raw, required_keys).map_err(|e| {
        warn!(
            key = %e.key,
            failure = %e.failure,
            raw_len = raw.len(),
            raw_preview = %e.raw_preview(),
            "Reply missing required section"
        );
        e
    })?;

    debug!(
        sections = sections.len(),
        total_tokens = usage.map(|u| u.total_tokens),
        "Parsed structured reply"
    );

    Ok(StructuredReply {
        sections,
        raw,
        usage,
    })
}
