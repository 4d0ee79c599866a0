//! GeminiGateway - Direct REST implementation of the AI gateway.

use std::time::Duration;

use async_trait::async_trait;
use campusdesk_core::chat::{ChatMessage, ChatRole, FileData};
use campusdesk_core::config::GeminiSettings;
use campusdesk_core::gateway::{AiGateway, ChatRequest, GatewayError};
use campusdesk_core::issue::{Issue, Sentiment};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prompts::{
    ATTACHMENT_DEFAULT_PROMPT, GenerationProfile, sentiment_prompt, summary_prompt,
};

/// [`AiGateway`] that talks to the Gemini HTTP API.
///
/// Every call is a single `generateContent` request. There is no retry and
/// no streaming; failures are returned as [`GatewayError`] for the caller to
/// recover from.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    settings: GeminiSettings,
}

impl GeminiGateway {
    /// Builds a gateway with a client honoring `settings.timeout_secs`.
    pub fn new(api_key: impl Into<String>, settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| GatewayError::Other(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
        })
    }

    /// Forces every request onto one model (`model_name` in secret.json).
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.settings.chat_model = model.clone();
            self.settings.pro_model = model.clone();
            self.settings.flash_model = model;
        }
        self
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    async fn generate(
        &self,
        profile: &GenerationProfile,
        contents: Vec<Content>,
    ) -> Result<String, GatewayError> {
        let request = build_request(profile, contents);
        let url = format!(
            "{base}/models/{model}:generateContent?key={api_key}",
            base = self.settings.base_url.trim_end_matches('/'),
            model = profile.model,
            api_key = self.api_key
        );

        debug!(model = %profile.model, turns = request.contents.len(), "Sending Gemini request");

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                // the URL carries the API key
                GatewayError::Transport {
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| {
                GatewayError::Other(format!(
                    "Failed to parse Gemini response: {}",
                    err.without_url()
                ))
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn classify_sentiment(&self, text: &str) -> Result<Sentiment, GatewayError> {
        let prompt =
            sentiment_prompt(text).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        let profile = GenerationProfile::sentiment(&self.settings);
        let reply = self.generate(&profile, vec![Content::user_text(prompt)]).await?;
        Ok(Sentiment::from_reply(&reply))
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, GatewayError> {
        let profile = GenerationProfile::for_panel(request.panel, &self.settings);
        let contents =
            chat_contents(&request.history, &request.prompt, request.attachment.as_ref());
        self.generate(&profile, contents).await
    }

    async fn summarize(&self, issues: &[Issue]) -> Result<String, GatewayError> {
        let prompt =
            summary_prompt(issues).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        let profile = GenerationProfile::summary(&self.settings);
        self.generate(&profile, vec![Content::user_text(prompt)]).await
    }
}

/// History as text turns, then the new user turn (attachment first).
fn chat_contents(
    history: &[ChatMessage],
    prompt: &str,
    attachment: Option<&FileData>,
) -> Vec<Content> {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|message| Content {
            role: match message.role {
                ChatRole::User => "user",
                ChatRole::Model => "model",
            }
            .to_string(),
            parts: vec![Part::Text {
                text: message.text.clone(),
            }],
        })
        .collect();

    let mut parts = Vec::new();
    if let Some(file) = attachment {
        parts.push(Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
        });
    }
    let text = if prompt.trim().is_empty() && attachment.is_some() {
        ATTACHMENT_DEFAULT_PROMPT
    } else {
        prompt
    };
    parts.push(Part::Text {
        text: text.to_string(),
    });

    contents.push(Content {
        role: "user".to_string(),
        parts,
    });
    contents
}

fn build_request(profile: &GenerationProfile, contents: Vec<Content>) -> GenerateContentRequest {
    let system_instruction = profile.system_instruction.map(|text| SystemInstruction {
        parts: vec![Part::Text {
            text: text.to_string(),
        }],
    });

    let generation_config = GenerationConfig {
        temperature: profile.temperature,
        top_p: profile.top_p,
        thinking_config: profile
            .thinking_budget
            .map(|thinking_budget| ThinkingConfig { thinking_budget }),
    };

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: (!generation_config.is_empty()).then_some(generation_config),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text { text }],
        }
    }
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.thinking_config.is_none()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the answer parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GatewayError::Http {
        status_code: status.as_u16(),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not supported
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
