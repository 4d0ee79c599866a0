//! Issue workflow use case.
//!
//! Wraps [`IssueManager`] with sentiment classification, persistence of the
//! whole collection after every mutation, and the admin summary.

use std::sync::Arc;

use campusdesk_core::Result;
use campusdesk_core::gateway::{AiGateway, GatewayError};
use campusdesk_core::issue::{
    Breakdown, Issue, IssueDraft, IssueManager, IssueRepository, IssueStats, IssueStatus,
    Sentiment, TransitionTable, filter_issues,
};
use campusdesk_core::session::Role;
use campusdesk_infrastructure::seed;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shown when the summary cannot be produced.
pub const SUMMARY_FALLBACK: &str = "Unable to generate summary at this time.";

/// Use case for reporting, triaging and summarizing issues.
///
/// The in-memory collection is authoritative for the session; storage writes
/// are snapshots and a failed write only logs a warning.
pub struct IssueUseCase {
    manager: RwLock<IssueManager>,
    repository: Arc<dyn IssueRepository>,
    gateway: Arc<dyn AiGateway>,
}

impl IssueUseCase {
    /// Loads the stored collection, seeding it with the initial issue when
    /// nothing was stored yet.
    ///
    /// A stored collection that cannot be decoded is an error; it is never
    /// silently replaced.
    pub async fn load(
        repository: Arc<dyn IssueRepository>,
        gateway: Arc<dyn AiGateway>,
        transitions: TransitionTable,
    ) -> Result<Self> {
        let (issues, seeded) = match repository.load_all().await? {
            Some(issues) => (issues, false),
            None => (seed::initial_issues(), true),
        };

        let usecase = Self {
            manager: RwLock::new(IssueManager::new(issues, transitions)),
            repository,
            gateway,
        };
        if seeded {
            info!("No stored issues, seeding initial collection");
            usecase.persist(usecase.manager.read().await.issues()).await;
        }
        Ok(usecase)
    }

    /// Snapshot of the collection, most recent first.
    pub async fn issues(&self) -> Vec<Issue> {
        self.manager.read().await.issues().to_vec()
    }

    pub async fn find(&self, id: &str) -> Option<Issue> {
        self.manager.read().await.find(id).cloned()
    }

    /// Classifies the description, then records a new `Open` issue for `role`.
    ///
    /// A gateway failure never blocks creation: the issue gets `Neutral`.
    pub async fn create_issue(&self, draft: IssueDraft, role: Role) -> Issue {
        let sentiment = self.classify(draft.description_text()).await;

        let mut manager = self.manager.write().await;
        let issue = manager.create(draft, role.reporter(), sentiment).clone();
        info!(issue_id = %issue.id, %sentiment, "Issue reported");

        self.persist(manager.issues()).await;
        issue
    }

    /// Changes the status of an issue.
    ///
    /// `Ok(None)` for an unknown id (nothing is written). Fails with
    /// `InvalidTransition` when the configured table refuses the change.
    pub async fn update_status(&self, id: &str, status: IssueStatus) -> Result<Option<Issue>> {
        let mut manager = self.manager.write().await;
        let Some(updated) = manager.update_status(id, status)?.cloned() else {
            return Ok(None);
        };
        info!(issue_id = %id, %status, "Issue status updated");

        self.persist(manager.issues()).await;
        Ok(Some(updated))
    }

    pub async fn filter(&self, status: Option<IssueStatus>, search: &str) -> Vec<Issue> {
        let manager = self.manager.read().await;
        filter_issues(manager.issues(), status, search)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> IssueStats {
        IssueStats::of(self.manager.read().await.issues())
    }

    pub async fn breakdown(&self) -> Breakdown {
        Breakdown::of(self.manager.read().await.issues())
    }

    /// Statuses the given issue may move to under the configured table.
    pub async fn next_states(&self, id: &str) -> Option<Vec<IssueStatus>> {
        let manager = self.manager.read().await;
        let issue = manager.find(id)?;
        Some(manager.transitions().next_states(issue.status))
    }

    /// AI summary of the current collection, or [`SUMMARY_FALLBACK`].
    pub async fn summarize(&self) -> String {
        let issues = self.issues().await;
        match self.gateway.summarize(&issues).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) | Err(GatewayError::EmptyResponse) => SUMMARY_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "Summary generation failed");
                SUMMARY_FALLBACK.to_string()
            }
        }
    }

    async fn classify(&self, text: &str) -> Sentiment {
        match self.gateway.classify_sentiment(text).await {
            Ok(sentiment) => sentiment,
            Err(err) => {
                warn!(error = %err, "Sentiment analysis failed, defaulting to Neutral");
                Sentiment::Neutral
            }
        }
    }

    async fn persist(&self, issues: &[Issue]) {
        if let Err(err) = self.repository.save_all(issues).await {
            warn!(error = %err, "Failed to persist issues");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingIssueRepository, ScriptedGateway};
    use campusdesk_core::issue::{IssueCategory, IssuePriority};
    use campusdesk_infrastructure::KvIssueRepository;
    use campusdesk_infrastructure::storage::MemoryStore;

    async fn usecase(gateway: ScriptedGateway) -> (IssueUseCase, Arc<KvIssueRepository>) {
        let repository = Arc::new(KvIssueRepository::new(Arc::new(MemoryStore::new())));
        let usecase = IssueUseCase::load(
            repository.clone(),
            Arc::new(gateway),
            TransitionTable::default(),
        )
        .await
        .unwrap();
        (usecase, repository)
    }

    #[tokio::test]
    async fn test_first_load_seeds_and_persists() {
        let (usecase, repository) = usecase(ScriptedGateway::default()).await;

        let issues = usecase.issues().await;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "ISS-101");
        assert_eq!(repository.load_all().await.unwrap().unwrap(), issues);
    }

    #[tokio::test]
    async fn test_create_uses_classified_sentiment_and_persists() {
        let (usecase, repository) =
            usecase(ScriptedGateway::default().with_sentiment(Ok(Sentiment::Urgent))).await;

        let issue = usecase
            .create_issue(
                IssueDraft::new("Lab flooded", "Water everywhere in lab 3")
                    .with_category(IssueCategory::Infrastructure),
                Role::Student,
            )
            .await;

        assert_eq!(issue.sentiment, Some(Sentiment::Urgent));
        assert_eq!(issue.student_id, "STU-2024-0812");
        let stored = repository.load_all().await.unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], issue);
    }

    #[tokio::test]
    async fn test_admin_reporter_identity() {
        let (usecase, _) = usecase(ScriptedGateway::default()).await;
        let issue = usecase
            .create_issue(IssueDraft::new("Chairs", "Broken"), Role::Admin)
            .await;
        assert_eq!(issue.student_name, "Administrator");
        assert_eq!(issue.student_id, "ADMIN-001");
    }

    #[tokio::test]
    async fn test_sentiment_failure_defaults_to_neutral() {
        let (usecase, _) = usecase(
            ScriptedGateway::default().with_sentiment(Err(GatewayError::Http {
                status_code: 500,
                message: "boom".to_string(),
                is_retryable: true,
                retry_after: None,
            })),
        )
        .await;

        let issue = usecase
            .create_issue(IssueDraft::new("T", "D"), Role::Student)
            .await;

        assert_eq!(issue.sentiment, Some(Sentiment::Neutral));
        assert_eq!(usecase.issues().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_status_persists_and_unknown_is_noop() {
        let (usecase, repository) = usecase(ScriptedGateway::default()).await;

        let updated = usecase
            .update_status("ISS-101", IssueStatus::Resolved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, IssueStatus::Resolved);
        assert_eq!(
            repository.load_all().await.unwrap().unwrap()[0].status,
            IssueStatus::Resolved
        );

        let before = usecase.issues().await;
        assert!(usecase
            .update_status("ISS-NOPE", IssueStatus::Open)
            .await
            .unwrap()
            .is_none());
        assert_eq!(usecase.issues().await, before);
    }

    #[tokio::test]
    async fn test_forward_only_table_is_enforced() {
        let repository = Arc::new(KvIssueRepository::new(Arc::new(MemoryStore::new())));
        let usecase = IssueUseCase::load(
            repository,
            Arc::new(ScriptedGateway::default()),
            TransitionTable::forward_only(),
        )
        .await
        .unwrap();

        usecase
            .update_status("ISS-101", IssueStatus::Resolved)
            .await
            .unwrap();
        let err = usecase
            .update_status("ISS-101", IssueStatus::Open)
            .await
            .unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(usecase.next_states("ISS-101").await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_state() {
        let usecase = IssueUseCase::load(
            Arc::new(FailingIssueRepository),
            Arc::new(ScriptedGateway::default()),
            TransitionTable::default(),
        )
        .await
        .unwrap();

        usecase
            .create_issue(IssueDraft::new("T", "D"), Role::Student)
            .await;
        assert_eq!(usecase.issues().await.len(), 2);
    }

    #[tokio::test]
    async fn test_summary_fallbacks() {
        let (ok, _) =
            usecase(ScriptedGateway::default().with_summary(Ok("Top problem: Wi-Fi".to_string())))
                .await;
        assert_eq!(ok.summarize().await, "Top problem: Wi-Fi");

        let (failing, _) = usecase(
            ScriptedGateway::default().with_summary(Err(GatewayError::Transport {
                message: "offline".to_string(),
                is_retryable: true,
            })),
        )
        .await;
        assert_eq!(failing.summarize().await, SUMMARY_FALLBACK);

        let gateway = ScriptedGateway::default().with_summary(Err(GatewayError::EmptyResponse));
        let (empty, _) = usecase(gateway).await;
        assert_eq!(empty.summarize().await, SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn test_queries() {
        let (usecase, _) = usecase(ScriptedGateway::default()).await;
        usecase
            .create_issue(
                IssueDraft::new("Projector broken", "Room 204").with_priority(IssuePriority::Low),
                Role::Student,
            )
            .await;

        assert_eq!(usecase.filter(None, "projector").await.len(), 1);
        assert_eq!(usecase.filter(Some(IssueStatus::Resolved), "").await.len(), 0);
        assert_eq!(usecase.stats().await.open, 2);
        assert_eq!(usecase.breakdown().await.by_category.len(), 2);
    }
}
