pub mod kv_chat_history_repository;
pub mod kv_issue_repository;
pub mod paths;
pub mod seed;
pub mod session_state_service;
pub mod storage;

pub use crate::kv_chat_history_repository::KvChatHistoryRepository;
pub use crate::kv_issue_repository::KvIssueRepository;
pub use crate::paths::{CampusPaths, PathError};
pub use crate::seed::MockCatalog;
pub use crate::session_state_service::SessionStateService;
