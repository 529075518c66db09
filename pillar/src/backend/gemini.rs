//! Gemini `generateContent` backend with Google Search grounding.
//!
//! Uses [`reqwest::Client`] for HTTP. API:
//! https://ai.google.dev/api/generate-content
//!
//! Requires `GEMINI_API_KEY` (or `API_KEY`) in environment or passed via [`GeminiConfig::new`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BackendError, BackendRequest, BackendResponse, GenerativeBackend, GroundingChunk};

/// Default model id.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for [`GeminiBackend`].
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: Arc<str>,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads `GEMINI_API_KEY` (fallback `API_KEY`), `PILLAR_MODEL` and `GEMINI_BASE_URL`.
    /// Blank values count as unset.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BackendError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_key = get("GEMINI_API_KEY")
            .or_else(|| get("API_KEY"))
            .ok_or(BackendError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(model) = get("PILLAR_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<RequestTool>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct RequestTool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a BackendRequest) -> Self {
        let tools = if request.web_search {
            vec![RequestTool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.instruction,
                }],
            }],
            tools,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// Decodes a `generateContent` response body into text + grounding chunks.
///
/// Only the first candidate is read. Its non-thought text parts are concatenated; a response
/// without candidates yields empty text.
pub fn decode_response(body: &str) -> Result<BackendResponse, BackendError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;
    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Ok(BackendResponse::default());
    };
    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    let grounding_chunks = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();
    Ok(BackendResponse {
        text,
        grounding_chunks,
    })
}

/// Gemini backend over HTTP.
///
/// No timeout or retry is configured here; a custom client can be supplied via
/// [`GeminiBackend::with_client`].
pub struct GeminiBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(config: GeminiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError> {
        let url = self.config.endpoint();
        tracing::debug!(
            model = %self.config.model,
            web_search = request.web_search,
            instruction_len = request.instruction.len(),
            "gemini generateContent"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.as_ref())
            .json(&GenerateContentRequest::from_request(request))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(format!("failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let decoded = decode_response(&body)?;
        tracing::debug!(
            text_len = decoded.text.len(),
            chunks = decoded.grounding_chunks.len(),
            "gemini response decoded"
        );
        Ok(decoded)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn config_requires_api_key() {
        let err = GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, BackendError::MissingApiKey);
    }

    #[test]
    fn config_falls_back_to_api_key_and_defaults() {
        let config = GeminiConfig::from_lookup(lookup(&[("API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key.as_ref(), "k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_overrides_and_endpoint() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("API_KEY", "ignored"),
            ("PILLAR_MODEL", "gemini-x"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9/"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_ref(), "k");
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn debug_hides_api_key() {
        let s = format!("{:?}", GeminiConfig::new("secret-key"));
        assert!(!s.contains("secret-key"));
    }

    #[test]
    fn request_body_has_search_tool_and_no_schema() {
        let req = BackendRequest::grounded("write a strategy");
        let body = serde_json::to_value(GenerateContentRequest::from_request(&req)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "write a strategy");
        assert_eq!(body["tools"][0]["google_search"], serde_json::json!({}));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn request_body_without_search_omits_tools() {
        let req = BackendRequest {
            instruction: "x".into(),
            web_search: false,
        };
        let body = serde_json::to_value(GenerateContentRequest::from_request(&req)).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn decode_joins_text_parts_and_skips_thoughts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "```json\n{\"a\":"},
                    {"text": "1}\n```"}
                ]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "a.example"}},
                        {"retrievedContext": {}}
                    ]
                }
            }]
        }"#;
        let out = decode_response(body).unwrap();
        assert_eq!(out.text, "```json\n{\"a\":1}\n```");
        assert_eq!(out.grounding_chunks.len(), 2);
        assert_eq!(
            out.grounding_chunks[0],
            GroundingChunk::web(Some("a.example"), Some("https://a.example"))
        );
        assert_eq!(out.grounding_chunks[1].web, None);
    }

    #[test]
    fn decode_without_candidates_is_empty() {
        let out = decode_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(out, BackendResponse::default());
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(matches!(
            decode_response("<html>"),
            Err(BackendError::Decode(_))
        ));
    }
}
