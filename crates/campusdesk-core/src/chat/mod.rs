//! Chat domain module: messages, transcripts with request tokens, panel
//! presets and the history repository interface.

mod message;
mod panel;
pub mod repository;
mod transcript;

pub use message::{ChatMessage, ChatRole, FileData};
pub use panel::{ALLOWED_ATTACHMENT_TYPES, ChatPanel, QUICK_PROBLEMS, QuickProblem, quick_problem};
pub use repository::ChatHistoryRepository;
pub use transcript::{ChatTranscript, RequestToken};
