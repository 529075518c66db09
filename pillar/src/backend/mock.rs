//! Mock backend for tests and for replaying a saved `generateContent` response.
//!
//! Returns a fixed [`BackendResponse`] (or a fixed [`BackendError`]) and records every request
//! it receives so callers can check what was sent and how many times.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    decode_response, BackendError, BackendRequest, BackendResponse, GenerativeBackend,
    GroundingChunk,
};

/// Mock backend: fixed outcome, recorded requests.
pub struct MockBackend {
    outcome: Result<BackendResponse, BackendError>,
    requests: Mutex<Vec<BackendRequest>>,
    name: String,
}

impl MockBackend {
    /// Returns `response` on every call.
    pub fn new(response: BackendResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
            name: "mock".to_string(),
        }
    }

    /// Returns the given text and no grounding chunks.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(BackendResponse {
            text: text.into(),
            grounding_chunks: Vec::new(),
        })
    }

    /// Returns the given text and grounding chunks.
    pub fn with_text_and_chunks(text: impl Into<String>, chunks: Vec<GroundingChunk>) -> Self {
        Self::new(BackendResponse {
            text: text.into(),
            grounding_chunks: chunks,
        })
    }

    /// Fails every call with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
            name: "mock".to_string(),
        }
    }

    /// Replays a raw `generateContent` response body (as saved from the API).
    pub fn from_generate_content_body(body: &str) -> Result<Self, BackendError> {
        Ok(Self::new(decode_response(body)?).with_name("replay"))
    }

    /// Set the label reported by [`GenerativeBackend::name`] (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
