//! Hand-written test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use campusdesk_core::gateway::{AiGateway, ChatRequest, GatewayError};
use campusdesk_core::issue::{Issue, IssueRepository, Sentiment};
use campusdesk_core::{CampusError, Result};

type Reply = (Duration, std::result::Result<String, GatewayError>);

/// Gateway returning pre-programmed answers.
///
/// Chat replies are consumed in call order; once the queue is empty every
/// chat call answers "ok".
pub struct ScriptedGateway {
    sentiment: std::result::Result<Sentiment, GatewayError>,
    summary: std::result::Result<String, GatewayError>,
    chat_replies: Mutex<VecDeque<Reply>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            sentiment: Ok(Sentiment::Neutral),
            summary: Ok("summary".to_string()),
            chat_replies: Mutex::new(VecDeque::new()),
            chat_requests: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedGateway {
    pub fn with_sentiment(
        mut self,
        sentiment: std::result::Result<Sentiment, GatewayError>,
    ) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_summary(mut self, summary: std::result::Result<String, GatewayError>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_chat_reply(self, reply: std::result::Result<&str, GatewayError>) -> Self {
        self.with_delayed_chat_reply(Duration::ZERO, reply)
    }

    pub fn with_delayed_chat_reply(
        self,
        delay: Duration,
        reply: std::result::Result<&str, GatewayError>,
    ) -> Self {
        self.chat_replies
            .lock()
            .unwrap()
            .push_back((delay, reply.map(str::to_string)));
        self
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiGateway for ScriptedGateway {
    async fn classify_sentiment(
        &self,
        _text: &str,
    ) -> std::result::Result<Sentiment, GatewayError> {
        self.sentiment.clone()
    }

    async fn chat(&self, request: ChatRequest) -> std::result::Result<String, GatewayError> {
        self.chat_requests.lock().unwrap().push(request);
        let next = self.chat_replies.lock().unwrap().pop_front();
        let (delay, reply) = next.unwrap_or((Duration::ZERO, Ok("ok".to_string())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    async fn summarize(&self, _issues: &[Issue]) -> std::result::Result<String, GatewayError> {
        self.summary.clone()
    }
}

/// Repository whose reads find nothing and whose writes always fail.
pub struct FailingIssueRepository;

#[async_trait]
impl IssueRepository for FailingIssueRepository {
    async fn load_all(&self) -> Result<Option<Vec<Issue>>> {
        Ok(None)
    }

    async fn save_all(&self, _issues: &[Issue]) -> Result<()> {
        Err(CampusError::io("disk full"))
    }
}
