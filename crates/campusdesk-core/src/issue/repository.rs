//! Issue repository trait.
//!
//! Defines the persistence boundary for the issue collection.

use async_trait::async_trait;

use super::model::Issue;
use crate::error::Result;

/// An abstract repository for the issue collection.
///
/// The collection is always read and written as a whole; there is no
/// per-record update and no delete.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Loads the stored collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Vec<Issue>))`: A collection was stored
    /// - `Ok(None)`: Nothing stored yet; callers fall back to seed data
    /// - `Err(_)`: Storage could not be read or decoded
    async fn load_all(&self) -> Result<Option<Vec<Issue>>>;

    /// Replaces the stored collection with `issues`.
    async fn save_all(&self, issues: &[Issue]) -> Result<()>;
}
