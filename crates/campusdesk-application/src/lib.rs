//! Application layer for CampusDesk.
//!
//! Use cases that coordinate the domain model with storage and the AI
//! gateway. Front ends only talk to this crate.

pub mod chat_service;
pub mod dashboard;
pub mod issue_usecase;
pub mod session_usecase;

#[cfg(test)]
mod testing;

pub use chat_service::{ChatOutcome, ChatService};
pub use dashboard::DashboardService;
pub use issue_usecase::{IssueUseCase, SUMMARY_FALLBACK};
pub use session_usecase::SessionUseCase;
