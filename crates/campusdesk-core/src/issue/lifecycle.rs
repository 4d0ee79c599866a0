//! Issue creation and status changes.
//!
//! [`IssueManager`] owns the in-memory collection and applies the
//! [`TransitionTable`] on every status change.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::model::{Issue, IssueDraft, IssueStatus, Reporter, Sentiment};
use super::transition::TransitionTable;
use crate::error::{CampusError, Result};

/// Prefix of every generated issue identifier.
pub const ISSUE_ID_PREFIX: &str = "ISS-";

/// The central state manager for issue tickets.
///
/// `IssueManager` owns the session's issue collection, kept most-recent-first,
/// and is the only place where issues are created or change status. It does
/// not persist anything itself; callers save [`IssueManager::issues`] after
/// every successful mutation.
#[derive(Debug, Clone, Default)]
pub struct IssueManager {
    issues: Vec<Issue>,
    transitions: TransitionTable,
}

impl IssueManager {
    /// Creates a manager over an existing collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use campusdesk_core::issue::{IssueManager, TransitionTable};
    ///
    /// let manager = IssueManager::new(Vec::new(), TransitionTable::permissive());
    /// assert!(manager.issues().is_empty());
    /// ```
    pub fn new(issues: Vec<Issue>, transitions: TransitionTable) -> Self {
        Self {
            issues,
            transitions,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn find(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Creates a new ticket from a draft and prepends it to the collection.
    ///
    /// The new issue is always `Open`, carries a freshly generated identifier
    /// and the reporter's identity, and keeps the sentiment classified by the
    /// caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use campusdesk_core::issue::{IssueDraft, IssueManager, IssueStatus, Reporter, Sentiment};
    ///
    /// let mut manager = IssueManager::default();
    /// let reporter = Reporter { name: "Alex Student".into(), id: "STU-2024-0812".into() };
    /// let issue = manager.create(IssueDraft::new("T", "D"), reporter, Sentiment::Neutral);
    /// assert_eq!(issue.status, IssueStatus::Open);
    /// ```
    pub fn create(
        &mut self,
        draft: IssueDraft,
        reporter: Reporter,
        sentiment: Sentiment,
    ) -> &Issue {
        let draft = draft.resolve();
        let issue = Issue {
            id: self.next_id(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            status: IssueStatus::Open,
            priority: draft.priority,
            student_name: reporter.name,
            student_id: reporter.id,
            created_at: Utc::now(),
            sentiment: Some(sentiment),
        };

        debug!(issue_id = %issue.id, category = %issue.category, "Issue created");
        self.issues.insert(0, issue);
        &self.issues[0]
    }

    /// Sets the status of the issue with the given id.
    ///
    /// Returns `Ok(None)` without touching the collection when no issue has
    /// that id. Fails with [`CampusError::InvalidTransition`] when the
    /// transition table refuses the change.
    pub fn update_status(&mut self, id: &str, status: IssueStatus) -> Result<Option<&Issue>> {
        let Some(index) = self.issues.iter().position(|issue| issue.id == id) else {
            debug!(issue_id = %id, "Status update for unknown issue ignored");
            return Ok(None);
        };

        let current = self.issues[index].status;
        if !self.transitions.allows(current, status) {
            return Err(CampusError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        self.issues[index].status = status;
        Ok(Some(&self.issues[index]))
    }

    /// Generates an identifier not used by any issue currently held.
    fn next_id(&self) -> String {
        loop {
            let hex = Uuid::new_v4().simple().to_string().to_uppercase();
            let candidate = format!("{ISSUE_ID_PREFIX}{}", &hex[..12]);
            if self.find(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueCategory, IssuePriority};
    use std::collections::HashSet;

    fn reporter() -> Reporter {
        Reporter {
            name: "Alex Student".to_string(),
            id: "STU-2024-0812".to_string(),
        }
    }

    #[test]
    fn test_new_manager_is_empty() {
        let manager = IssueManager::default();
        assert_eq!(manager.issues().len(), 0);
    }

    #[test]
    fn test_create_issue() {
        let mut manager = IssueManager::default();
        let draft = IssueDraft::new("Projector broken", "Room 204 projector won't turn on")
            .with_category(IssueCategory::It)
            .with_priority(IssuePriority::Medium);

        let issue = manager.create(draft, reporter(), Sentiment::Frustrated).clone();

        assert_eq!(issue.title, "Projector broken");
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.category, IssueCategory::It);
        assert_eq!(issue.priority, IssuePriority::Medium);
        assert_eq!(issue.student_name, "Alex Student");
        assert_eq!(issue.sentiment, Some(Sentiment::Frustrated));
        assert!(issue.id.starts_with(ISSUE_ID_PREFIX));
        assert_eq!(issue.id.len(), ISSUE_ID_PREFIX.len() + 12);
    }

    #[test]
    fn test_create_prepends_and_ids_are_unique() {
        let mut manager = IssueManager::default();

        for i in 0..50 {
            manager.create(IssueDraft::new(format!("T{i}"), "D"), reporter(), Sentiment::Neutral);
        }

        assert_eq!(manager.issues().len(), 50);
        assert_eq!(manager.issues()[0].title, "T49");
        assert_eq!(manager.issues()[49].title, "T0");
        let ids: HashSet<_> = manager.issues().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_status_changes_only_status() {
        let mut manager = IssueManager::default();
        let id = manager
            .create(IssueDraft::new("T", "D"), reporter(), Sentiment::Neutral)
            .id
            .clone();
        let before = manager.find(&id).unwrap().clone();

        let updated = manager
            .update_status(&id, IssueStatus::InProgress)
            .unwrap()
            .unwrap()
            .clone();

        assert_eq!(updated.status, IssueStatus::InProgress);
        assert_eq!(
            Issue {
                status: before.status,
                ..updated
            },
            before
        );
    }

    #[test]
    fn test_update_status_unknown_id_is_noop() {
        let mut manager = IssueManager::default();
        manager.create(IssueDraft::new("T", "D"), reporter(), Sentiment::Neutral);
        let before = manager.issues().to_vec();

        let result = manager.update_status("ISS-MISSING", IssueStatus::Resolved).unwrap();

        assert!(result.is_none());
        assert_eq!(manager.issues(), before.as_slice());
    }

    #[test]
    fn test_forward_only_rejects_reopen() {
        let mut manager = IssueManager::new(Vec::new(), TransitionTable::forward_only());
        let id = manager
            .create(IssueDraft::new("T", "D"), reporter(), Sentiment::Neutral)
            .id
            .clone();
        manager.update_status(&id, IssueStatus::Resolved).unwrap();

        let err = manager.update_status(&id, IssueStatus::Open).unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(manager.find(&id).unwrap().status, IssueStatus::Resolved);
    }

    #[test]
    fn test_permissive_allows_reopen() {
        let mut manager = IssueManager::default();
        let id = manager
            .create(IssueDraft::new("T", "D"), reporter(), Sentiment::Neutral)
            .id
            .clone();
        manager.update_status(&id, IssueStatus::Resolved).unwrap();
        manager.update_status(&id, IssueStatus::Open).unwrap();
        assert_eq!(manager.find(&id).unwrap().status, IssueStatus::Open);
    }
}
