//! Chat panel service.
//!
//! Drives one [`ChatPanel`]: appends the user's turn, asks the gateway for a
//! reply, and appends the reply only if no newer request has been made in
//! the meantime.

use std::sync::Arc;

use campusdesk_core::chat::{
    ChatHistoryRepository, ChatMessage, ChatPanel, ChatTranscript, FileData, quick_problem,
};
use campusdesk_core::gateway::{AiGateway, ChatRequest, GatewayError};
use campusdesk_core::{CampusError, Result};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The reply (or the panel's fallback text) was appended.
    Replied(ChatMessage),
    /// A newer send or a clear replaced this request; nothing was appended.
    Superseded,
}

pub struct ChatService {
    panel: ChatPanel,
    transcript: Mutex<ChatTranscript>,
    /// Token of the in-flight request, cancelled when a newer one starts.
    inflight: Mutex<Option<CancellationToken>>,
    gateway: Arc<dyn AiGateway>,
    history: Option<Arc<dyn ChatHistoryRepository>>,
}

impl ChatService {
    /// Opens a panel. Persisted panels restore their stored transcript,
    /// falling back to the greeting when nothing is stored.
    pub async fn open(
        panel: ChatPanel,
        gateway: Arc<dyn AiGateway>,
        history: Option<Arc<dyn ChatHistoryRepository>>,
    ) -> Self {
        let history = history.filter(|_| panel.is_persisted());

        let messages = match &history {
            Some(repository) => match repository.load().await {
                Ok(Some(stored)) => stored,
                Ok(None) => panel.initial_transcript(),
                Err(err) => {
                    warn!(%panel, error = %err, "Failed to load chat history");
                    panel.initial_transcript()
                }
            },
            None => panel.initial_transcript(),
        };

        Self {
            panel,
            transcript: Mutex::new(ChatTranscript::new(messages)),
            inflight: Mutex::new(None),
            gateway,
            history,
        }
    }

    pub fn panel(&self) -> ChatPanel {
        self.panel
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.messages().to_vec()
    }

    /// Sends a user turn and waits for the model's reply.
    ///
    /// Gateway failures are not errors: the panel's fallback text becomes
    /// the reply. Errors are only returned for invalid input.
    pub async fn send(&self, prompt: &str, attachment: Option<FileData>) -> Result<ChatOutcome> {
        if prompt.trim().is_empty() && attachment.is_none() {
            return Err(CampusError::validation("message is empty"));
        }
        if attachment.is_some() && !self.panel.accepts_attachments() {
            return Err(CampusError::validation(format!(
                "the {} panel does not accept attachments",
                self.panel
            )));
        }

        let text = match (&attachment, prompt.trim().is_empty()) {
            (Some(file), true) => format!(
                "Analyzing: {}",
                file.name.as_deref().unwrap_or("attachment")
            ),
            _ => prompt.to_string(),
        };
        let mut user_message = ChatMessage::user(text);
        if let Some(file) = &attachment {
            user_message = user_message.with_file(file.clone());
        }

        // The request token and the cancellation token must be issued under
        // the same transcript lock, or an older send could cancel a newer one.
        let (token, history, cancel) = {
            let mut transcript = self.transcript.lock().await;
            let (token, history) = transcript.begin(user_message);
            let cancel = self.replace_inflight().await;
            self.persist(&transcript).await;
            (token, history, cancel)
        };
        debug!(panel = %self.panel, request = token.value(), "Chat request started");

        let request = ChatRequest::new(self.panel, history, prompt).with_attachment(attachment);
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(panel = %self.panel, request = token.value(), "Chat request superseded");
                return Ok(ChatOutcome::Superseded);
            }
            result = self.gateway.chat(request) => result,
        };

        let reply = ChatMessage::model(self.reply_text(result));

        let mut transcript = self.transcript.lock().await;
        if !transcript.complete(token, reply.clone()) {
            return Ok(ChatOutcome::Superseded);
        }
        self.persist(&transcript).await;
        Ok(ChatOutcome::Replied(reply))
    }

    /// Sends the canned prompt of a helpdesk quick problem.
    pub async fn send_quick(&self, problem_id: &str) -> Result<ChatOutcome> {
        let problem = quick_problem(problem_id)
            .ok_or_else(|| CampusError::not_found("quick problem", problem_id))?;
        self.send(problem.prompt, None).await
    }

    /// Resets the transcript; any outstanding reply is discarded.
    pub async fn clear(&self) {
        let mut transcript = self.transcript.lock().await;
        if let Some(previous) = self.inflight.lock().await.take() {
            previous.cancel();
        }
        transcript.reset(self.panel.cleared_transcript());
        self.persist(&transcript).await;
    }

    fn reply_text(&self, result: std::result::Result<String, GatewayError>) -> String {
        match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(GatewayError::EmptyResponse) => self.panel.empty_reply().to_string(),
            Err(err) => {
                warn!(panel = %self.panel, error = %err, "Chat request failed");
                self.panel.failure_reply().to_string()
            }
        }
    }

    /// Callers hold the transcript lock; the lock order is transcript, then
    /// `inflight`.
    async fn replace_inflight(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.inflight.lock().await.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    async fn persist(&self, transcript: &ChatTranscript) {
        let Some(repository) = &self.history else {
            return;
        };
        if let Err(err) = repository.save(transcript.messages()).await {
            warn!(panel = %self.panel, error = %err, "Failed to persist chat history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGateway;
    use campusdesk_core::chat::ChatRole;
    use campusdesk_infrastructure::KvChatHistoryRepository;
    use campusdesk_infrastructure::storage::MemoryStore;
    use std::time::Duration;

    fn pdf() -> FileData {
        FileData {
            mime_type: "application/pdf".to_string(),
            data: "JVBERi0=".to_string(),
            name: Some("notes.pdf".to_string()),
        }
    }

    #[tokio::test]
    async fn test_helpdesk_reply_is_appended() {
        let gateway = Arc::new(ScriptedGateway::default().with_chat_reply(Ok("75% is required.")));
        let service = ChatService::open(ChatPanel::Helpdesk, gateway.clone(), None).await;

        let outcome = service.send_quick("attendance").await.unwrap();

        let ChatOutcome::Replied(reply) = outcome else {
            panic!("expected a reply");
        };
        assert_eq!(reply.text, "75% is required.");
        let messages = service.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);

        let requests = gateway.chat_requests();
        assert_eq!(requests[0].history.len(), 1);
        assert!(requests[0].prompt.contains("attendance rules"));
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let gateway = Arc::new(ScriptedGateway::default().with_chat_reply(Err(
            GatewayError::Transport {
                message: "offline".to_string(),
                is_retryable: true,
            },
        )));
        let service = ChatService::open(ChatPanel::Helpdesk, gateway, None).await;

        let outcome = service.send("hello", None).await.unwrap();

        assert_eq!(
            outcome,
            ChatOutcome::Replied(service.messages().await[2].clone())
        );
        assert_eq!(
            service.messages().await[2].text,
            ChatPanel::Helpdesk.failure_reply()
        );
    }

    #[tokio::test]
    async fn test_empty_reply_uses_panel_text() {
        let gateway =
            Arc::new(ScriptedGateway::default().with_chat_reply(Err(GatewayError::EmptyResponse)));
        let service = ChatService::open(ChatPanel::Pro, gateway, None).await;

        service.send("analyse", None).await.unwrap();

        assert_eq!(
            service.messages().await.last().unwrap().text,
            ChatPanel::Pro.empty_reply()
        );
    }

    #[tokio::test]
    async fn test_validation() {
        let gateway = Arc::new(ScriptedGateway::default());
        let helpdesk = ChatService::open(ChatPanel::Helpdesk, gateway.clone(), None).await;

        assert!(helpdesk.send("   ", None).await.unwrap_err().is_validation());
        assert!(helpdesk.send("x", Some(pdf())).await.unwrap_err().is_validation());
        assert!(helpdesk.send_quick("parking").await.unwrap_err().is_not_found());
        assert!(gateway.chat_requests().is_empty());
    }

    #[tokio::test]
    async fn test_pro_attachment_and_persistence() {
        let store = Arc::new(MemoryStore::new());
        let history: Arc<dyn ChatHistoryRepository> =
            Arc::new(KvChatHistoryRepository::new(store));
        let gateway = Arc::new(ScriptedGateway::default().with_chat_reply(Ok("It is a PDF.")));

        let service =
            ChatService::open(ChatPanel::Pro, gateway.clone(), Some(history.clone())).await;
        service.send("", Some(pdf())).await.unwrap();

        let messages = service.messages().await;
        assert_eq!(messages[1].text, "Analyzing: notes.pdf");
        assert!(messages[1].file_data.is_some());
        assert_eq!(gateway.chat_requests()[0].attachment, Some(pdf()));

        let reopened = ChatService::open(ChatPanel::Pro, gateway, Some(history)).await;
        assert_eq!(reopened.messages().await, messages);
    }

    #[tokio::test]
    async fn test_helpdesk_is_never_persisted() {
        let store = Arc::new(MemoryStore::new());
        let history: Arc<dyn ChatHistoryRepository> =
            Arc::new(KvChatHistoryRepository::new(store.clone()));
        let service = ChatService::open(
            ChatPanel::Helpdesk,
            Arc::new(ScriptedGateway::default()),
            Some(history.clone()),
        )
        .await;

        service.send("hi", None).await.unwrap();

        assert!(history.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = Arc::new(MemoryStore::new());
        let history: Arc<dyn ChatHistoryRepository> =
            Arc::new(KvChatHistoryRepository::new(store));
        let gateway = Arc::new(ScriptedGateway::default());

        let pro = ChatService::open(ChatPanel::Pro, gateway.clone(), Some(history.clone())).await;
        pro.send("q", None).await.unwrap();
        pro.clear().await;
        assert!(pro.messages().await.is_empty());
        assert_eq!(history.load().await.unwrap(), Some(vec![]));

        let helpdesk = ChatService::open(ChatPanel::Helpdesk, gateway, None).await;
        helpdesk.clear().await;
        assert_eq!(helpdesk.messages().await[0].text, "Hi! How can I help you today?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_send_supersedes_slow_reply() {
        let gateway = Arc::new(
            ScriptedGateway::default()
                .with_delayed_chat_reply(Duration::from_secs(5), Ok("slow"))
                .with_chat_reply(Ok("fast")),
        );
        let service = ChatService::open(ChatPanel::Helpdesk, gateway, None).await;

        let (first, second) = tokio::join!(service.send("first", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            service.send("second", None).await
        });

        assert_eq!(first.unwrap(), ChatOutcome::Superseded);
        assert!(matches!(second.unwrap(), ChatOutcome::Replied(ref m) if m.text == "fast"));

        let texts: Vec<_> = service.messages().await.into_iter().map(|m| m.text).collect();
        assert_eq!(texts[1..], ["first", "second", "fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_outstanding_reply() {
        let gateway = Arc::new(
            ScriptedGateway::default().with_delayed_chat_reply(Duration::from_secs(5), Ok("late")),
        );
        let service = ChatService::open(ChatPanel::Helpdesk, gateway, None).await;

        let (outcome, ()) = tokio::join!(service.send("question", None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            service.clear().await;
        });

        assert_eq!(outcome.unwrap(), ChatOutcome::Superseded);
        assert_eq!(service.messages().await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_always_answer_the_latest() {
        for round in 0..50 {
            let mut gateway = ScriptedGateway::default();
            for _ in 0..4 {
                gateway = gateway.with_delayed_chat_reply(Duration::from_millis(2), Ok("reply"));
            }
            let service =
                Arc::new(ChatService::open(ChatPanel::Helpdesk, Arc::new(gateway), None).await);

            let sends: Vec<_> = (0..4)
                .map(|i| {
                    let service = service.clone();
                    tokio::spawn(async move { service.send(&format!("q{i}"), None).await })
                })
                .collect();

            let mut replied = 0;
            for send in sends {
                if matches!(send.await.unwrap().unwrap(), ChatOutcome::Replied(_)) {
                    replied += 1;
                }
            }

            let messages = service.messages().await;
            let model_turns = messages.iter().filter(|m| m.role == ChatRole::Model).count();
            assert!(replied >= 1, "round {round}: {messages:?}");
            assert_eq!(model_turns, replied + 1, "round {round}");
            assert_eq!(messages.last().unwrap().role, ChatRole::Model, "round {round}");
        }
    }
}
