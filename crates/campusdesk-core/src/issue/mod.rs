//! Issue domain module.
//!
//! This module contains the issue ticket model, its status transition rules,
//! the lifecycle manager that owns the session's collection, read-side
//! queries and the repository interface.
//!
//! # Module Structure
//!
//! - `model`: `Issue`, its enumerations and the `IssueDraft` form data
//! - `transition`: configurable status transition table
//! - `lifecycle`: `IssueManager` (create / update status)
//! - `query`: filters, counters and breakdowns
//! - `repository`: `IssueRepository` trait for persistence

mod lifecycle;
mod model;
mod query;
pub mod repository;
mod transition;

pub use lifecycle::{ISSUE_ID_PREFIX, IssueManager};
pub use model::{
    Issue, IssueCategory, IssueDraft, IssuePriority, IssueStatus, Reporter, ResolvedDraft,
    Sentiment,
};
pub use query::{Breakdown, Bucket, IssueStats, filter_issues};
pub use repository::IssueRepository;
pub use transition::{TransitionPolicy, TransitionTable};
