//! Read-side helpers over an issue collection: filtering, counters and the
//! per-dimension breakdowns shown on the analytics view.

use serde::Serialize;

use super::model::{Issue, IssueStatus, Sentiment};

/// Ticket counters shown on the dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl IssueStats {
    pub fn of(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut stats, issue| {
            stats.total += 1;
            match issue.status {
                IssueStatus::Open => stats.open += 1,
                IssueStatus::InProgress => stats.in_progress += 1,
                IssueStatus::Resolved => stats.resolved += 1,
            }
            stats
        })
    }

    /// Everything not yet resolved.
    pub fn pending(&self) -> usize {
        self.total - self.resolved
    }
}

/// One bar of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub value: usize,
}

/// Issue counts grouped by category, status and sentiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub by_category: Vec<Bucket>,
    pub by_status: Vec<Bucket>,
    pub by_sentiment: Vec<Bucket>,
}

impl Breakdown {
    /// Buckets appear in the order their first member appears in `issues`.
    /// Issues without a sentiment count as `Neutral`.
    pub fn of(issues: &[Issue]) -> Self {
        Self {
            by_category: count_by(issues, |i| i.category.to_string()),
            by_status: count_by(issues, |i| i.status.to_string()),
            by_sentiment: count_by(issues, |i| {
                i.sentiment.unwrap_or(Sentiment::Neutral).to_string()
            }),
        }
    }
}

fn count_by(issues: &[Issue], key: impl Fn(&Issue) -> String) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for issue in issues {
        let name = key(issue);
        match buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => bucket.value += 1,
            None => buckets.push(Bucket { name, value: 1 }),
        }
    }
    buckets
}

/// Admin ticket-hub filter.
///
/// `status = None` means "All". The search term matches the title or the id,
/// case-insensitively; an empty term matches everything.
pub fn filter_issues<'a>(
    issues: &'a [Issue],
    status: Option<IssueStatus>,
    search: &str,
) -> Vec<&'a Issue> {
    let needle = search.to_lowercase();
    issues
        .iter()
        .filter(|issue| status.is_none_or(|s| issue.status == s))
        .filter(|issue| {
            issue.title.to_lowercase().contains(&needle)
                || issue.id.to_lowercase().contains(&needle)
        })
        .collect()
}
