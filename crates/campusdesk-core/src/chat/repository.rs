//! Chat history repository trait.

use async_trait::async_trait;

use super::message::ChatMessage;
use crate::error::Result;

/// Persistence for the pro assistant transcript.
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// `Ok(None)` when no transcript was stored yet.
    async fn load(&self) -> Result<Option<Vec<ChatMessage>>>;

    async fn save(&self, messages: &[ChatMessage]) -> Result<()>;
}
