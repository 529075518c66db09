//! Response normalizer: raw backend text + grounding chunks → [`Strategy`].
//!
//! Pure and synchronous. Steps, each terminal on failure:
//!
//! 1. [`extract_sources`]: citation chunks with a web reference and a usable URI become
//!    [`Source`]s (blank title → `"Source"`); other chunks are skipped.
//! 2. [`locate_payload`]: ```json fence → any fence → first `{` .. last `}`.
//! 3. Parse the candidate as JSON; the parser's diagnostic is kept on failure, no repair.
//! 4. Validate `pillar` and `subPillars`, naming the offending field on failure.
//! 5. Assemble, keeping sub-pillars in received order. Any sub-pillar count is accepted.

mod extract;
mod validate;

pub use extract::{locate_payload, Payload, PayloadOrigin};

use serde_json::Value;

use crate::backend::GroundingChunk;
use crate::error::{ParseFailure, StrategyError};
use crate::strategy::{Source, Strategy, EXPECTED_SUB_PILLARS};

/// Title used for citations the backend returned without one.
pub const PLACEHOLDER_SOURCE_TITLE: &str = "Source";

/// Converts grounding chunks to sources, preserving order and duplicates.
pub fn extract_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref().filter(|u| !u.trim().is_empty())?;
            let title = web
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(PLACEHOLDER_SOURCE_TITLE);
            Some(Source {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

/// Normalizes one backend response into a [`Strategy`].
pub fn normalize(raw_text: &str, chunks: &[GroundingChunk]) -> Result<Strategy, StrategyError> {
    let sources = extract_sources(chunks);
    if sources.len() != chunks.len() {
        tracing::debug!(
            chunks = chunks.len(),
            sources = sources.len(),
            "skipped grounding chunks without a web reference"
        );
    }

    let payload = locate_payload(raw_text).map_err(|e| {
        tracing::warn!(text_len = raw_text.len(), "no structured payload in response");
        e
    })?;
    tracing::debug!(origin = ?payload.origin, len = payload.text.len(), "payload located");

    let value: Value = serde_json::from_str(payload.text)
        .map_err(|e| ParseFailure::Malformed(e.to_string()))?;

    let (pillar, sub_pillars) = validate::payload(&value)?;
    if sub_pillars.len() != EXPECTED_SUB_PILLARS {
        tracing::warn!(
            expected = EXPECTED_SUB_PILLARS,
            got = sub_pillars.len(),
            "sub-pillar count differs from requested; keeping all"
        );
    }

    Ok(Strategy {
        pillar,
        sub_pillars,
        sources,
    })
}
