//! Generative backend abstraction used by the [`Orchestrator`](crate::Orchestrator).
//!
//! The orchestrator depends on a callable that turns one natural-language instruction into
//! free-form text plus grounding citations; this module defines that trait, the
//! request/response types, and two implementations:
//!
//! - [`GeminiBackend`]: Gemini `generateContent` over HTTP with Google Search grounding.
//! - [`MockBackend`]: fixed response (or fixed error) for tests and replaying saved responses.

mod gemini;
mod mock;

pub use gemini::{decode_response, GeminiBackend, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock::MockBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One generation request: the full instruction and whether web-search grounding is enabled.
///
/// No response-schema field: grounding and strict schema output cannot be combined, so the
/// payload contract lives entirely in `instruction`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendRequest {
    pub instruction: String,
    pub web_search: bool,
}

impl BackendRequest {
    /// Request with web-search grounding enabled.
    pub fn grounded(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            web_search: true,
        }
    }
}

/// Web reference carried by a grounding chunk. Either field may be missing on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A grounding chunk as returned by the backend. Chunks of other kinds (e.g. retrieved
/// context) deserialize with `web == None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebReference>,
}

impl GroundingChunk {
    pub fn web(title: Option<&str>, uri: Option<&str>) -> Self {
        Self {
            web: Some(WebReference {
                uri: uri.map(str::to_string),
                title: title.map(str::to_string),
            }),
        }
    }
}

/// Raw backend output: concatenated answer text and the ordered grounding chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendResponse {
    pub text: String,
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// Backend call failure. Not recoverable locally; surfaced to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("missing API key: set GEMINI_API_KEY (or API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Generative backend: given one instruction, returns text and grounding citations.
///
/// **Interaction**: Called exactly once per [`Orchestrator::generate`](crate::Orchestrator::generate).
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError>;

    /// Label for logs (e.g. the model id).
    fn name(&self) -> &str {
        "backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounding_chunk_without_web_deserializes() {
        let chunk: GroundingChunk =
            serde_json::from_str(r#"{"retrievedContext":{"uri":"x"}}"#).unwrap();
        assert_eq!(chunk.web, None);
    }

    #[test]
    fn grounding_chunk_with_partial_web() {
        let chunk: GroundingChunk = serde_json::from_str(r#"{"web":{"uri":"u2"}}"#).unwrap();
        assert_eq!(chunk, GroundingChunk::web(None, Some("u2")));
    }

    #[test]
    fn grounded_request_enables_web_search() {
        let req = BackendRequest::grounded("hi");
        assert!(req.web_search);
        assert_eq!(req.instruction, "hi");
    }
}
