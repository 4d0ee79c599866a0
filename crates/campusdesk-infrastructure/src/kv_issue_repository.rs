//! Issue collection stored as one JSON array under `campus_issues`.

use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_core::Result;
use campusdesk_core::issue::{Issue, IssueRepository};
use campusdesk_core::store::{ISSUES_KEY, KeyValueStore, read_json, write_json};

pub struct KvIssueRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvIssueRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IssueRepository for KvIssueRepository {
    async fn load_all(&self) -> Result<Option<Vec<Issue>>> {
        Ok(read_json(self.store.as_ref(), ISSUES_KEY)?)
    }

    async fn save_all(&self, issues: &[Issue]) -> Result<()> {
        Ok(write_json(self.store.as_ref(), ISSUES_KEY, issues)?)
    }
}
