//! Pro assistant transcript stored under `pro_ai_history`.

use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_core::Result;
use campusdesk_core::chat::{ChatHistoryRepository, ChatMessage};
use campusdesk_core::store::{KeyValueStore, PRO_CHAT_KEY, read_json, write_json};

pub struct KvChatHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvChatHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChatHistoryRepository for KvChatHistoryRepository {
    async fn load(&self) -> Result<Option<Vec<ChatMessage>>> {
        Ok(read_json(self.store.as_ref(), PRO_CHAT_KEY)?)
    }

    async fn save(&self, messages: &[ChatMessage]) -> Result<()> {
        Ok(write_json(self.store.as_ref(), PRO_CHAT_KEY, messages)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use campusdesk_core::chat::FileData;

    #[tokio::test]
    async fn test_transcript_roundtrip_keeps_attachment() {
        let repo = KvChatHistoryRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load().await.unwrap().is_none());

        let messages = vec![
            ChatMessage::user("Analyzing: notes.pdf").with_file(FileData {
                mime_type: "application/pdf".to_string(),
                data: "JVBERi0=".to_string(),
                name: Some("notes.pdf".to_string()),
            }),
            ChatMessage::model("Here is the analysis."),
        ];
        repo.save(&messages).await.unwrap();

        assert_eq!(repo.load().await.unwrap().unwrap(), messages);
    }
}
