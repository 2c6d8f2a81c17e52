//! Model service seam and the Gemini REST implementation.
//!
//! [`ModelService`] is the only place the audit client touches the network.
//! [`GeminiService`] calls the Google Generative Language API
//! `POST {base_url}/v1beta/models/{model}:generateContent`; base URL and
//! model come from [`AuditConfig`].  The transport's default timeout is
//! used as-is.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AuditConfig;

use super::prompt::{response_schema, PromptBuilder};

/// Candidate finish reasons that mean the output was withheld.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

// ---------------------------------------------------------------------------
// ServiceFailure
// ---------------------------------------------------------------------------

/// A failure raised by the model service, described only by its text.
///
/// The audit client classifies failures by inspecting this text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ServiceFailure(pub String);

impl From<reqwest::Error> for ServiceFailure {
    fn from(e: reqwest::Error) -> Self {
        ServiceFailure(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// AuditRequest
// ---------------------------------------------------------------------------

/// One instruction payload plus its structured-output declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRequest {
    pub prompt: String,
    pub response_schema: Value,
}

impl AuditRequest {
    pub fn new(source_text: &str, target_text: &str, target_language: &str) -> Self {
        Self {
            prompt: PromptBuilder::new(target_language).build(source_text, target_text),
            response_schema: response_schema(),
        }
    }
}

// ---------------------------------------------------------------------------
// ModelService trait
// ---------------------------------------------------------------------------

/// Async seam to the remote language model.
///
/// Implementors must be `Send + Sync` so one instance can serve concurrent
/// audits behind an `Arc<dyn ModelService>`.
///
/// Returns the raw text payload of the response; an empty string means the
/// service produced no text.
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn generate(
        &self,
        credential: &str,
        request: &AuditRequest,
    ) -> Result<String, ServiceFailure>;
}

// ---------------------------------------------------------------------------
// GeminiService
// ---------------------------------------------------------------------------

/// Calls the Gemini `generateContent` endpoint.
pub struct GeminiService {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiService {
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// JSON body for one audit request.
    pub fn request_body(request: &AuditRequest) -> Value {
        json!({
            "contents": [
                { "role": "user", "parts": [ { "text": request.prompt } ] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema
            }
        })
    }
}

#[async_trait]
impl ModelService for GeminiService {
    async fn generate(
        &self,
        credential: &str,
        request: &AuditRequest,
    ) -> Result<String, ServiceFailure> {
        log::debug!("gemini: POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", credential)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_failure(status, &body));
        }

        let payload: GenerateContentResponse = response.json().await?;
        extract_text(payload)
    }
}

/// Failure text for a non-2xx reply: `[<code> <reason>] <body>`.
fn status_failure(status: reqwest::StatusCode, body: &str) -> ServiceFailure {
    ServiceFailure(format!(
        "[{} {}] {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        body.trim()
    ))
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Concatenate the text parts of the first candidate.
///
/// Safety refusals surface as failures whose text contains `blocked`.
fn extract_text(payload: GenerateContentResponse) -> Result<String, ServiceFailure> {
    if let Some(reason) = payload.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ServiceFailure(format!(
            "prompt was blocked by the model service (blockReason: {reason})"
        )));
    }

    let Some(candidate) = payload.candidates.into_iter().next() else {
        return Ok(String::new());
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
    {
        return Err(ServiceFailure(format!(
            "response was blocked by the model service (finishReason: {reason})"
        )));
    }

    let text = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
