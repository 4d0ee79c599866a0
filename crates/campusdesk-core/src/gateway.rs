//! AI gateway contract.
//!
//! Three remote operations the dashboard depends on. Each is a single
//! request/response round trip with no retry; callers decide how to recover.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::{ChatMessage, ChatPanel, FileData};
use crate::issue::{Issue, Sentiment};

/// Failure of a gateway call.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    /// The service answered with a non-success status.
    #[error("HTTP {status_code}: {message}")]
    Http {
        status_code: u16,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The response decoded but carried no text.
    #[error("response contained no text")]
    EmptyResponse,

    /// The request could not be built (bad attachment, missing key).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Whether repeating the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Http { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

/// A chat turn sent to the gateway.
///
/// The gateway is stateless: `history` carries the whole transcript preceding
/// `prompt` on every call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub panel: ChatPanel,
    pub history: Vec<ChatMessage>,
    pub prompt: String,
    pub attachment: Option<FileData>,
}

impl ChatRequest {
    pub fn new(panel: ChatPanel, history: Vec<ChatMessage>, prompt: impl Into<String>) -> Self {
        Self {
            panel,
            history,
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<FileData>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// The generative-language service used for sentiment, chat and summaries.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Classifies the tone of an issue description.
    async fn classify_sentiment(&self, text: &str) -> Result<Sentiment, GatewayError>;

    /// Produces the next model turn of a conversation.
    async fn chat(&self, request: ChatRequest) -> Result<String, GatewayError>;

    /// Writes an executive summary of the given issues.
    async fn summarize(&self, issues: &[Issue]) -> Result<String, GatewayError>;
}
