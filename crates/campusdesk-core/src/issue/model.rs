//! Issue domain model.
//!
//! Issues are the only entity in CampusDesk with a lifecycle. Everything else
//! is read-only catalog data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Current stage of an issue ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum IssueStatus {
    Open,
    #[serde(rename = "In Progress")]
    #[strum(to_string = "In Progress", serialize = "in-progress", serialize = "in_progress")]
    InProgress,
    Resolved,
}

/// Department an issue is routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum IssueCategory {
    Academic,
    Curricular,
    Infrastructure,
    #[serde(rename = "IT")]
    #[strum(to_string = "IT")]
    It,
    Admin,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum IssuePriority {
    Low,
    Medium,
    High,
}

/// Coarse emotional tone of an issue description, assigned by the AI gateway.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Sentiment {
    Frustrated,
    #[default]
    Neutral,
    Urgent,
}

impl Sentiment {
    /// Interprets a free-text model reply as a sentiment label.
    ///
    /// The reply is expected to be exactly one label, but models tend to add
    /// punctuation or a sentence around it, so the first label mentioned wins.
    /// Anything unrecognizable is `Neutral`.
    pub fn from_reply(reply: &str) -> Self {
        let trimmed = reply.trim().trim_matches(|c: char| !c.is_alphanumeric());
        if let Ok(sentiment) = trimmed.parse::<Sentiment>() {
            return sentiment;
        }

        let lower = reply.to_lowercase();
        [Self::Frustrated, Self::Urgent, Self::Neutral]
            .into_iter()
            .filter_map(|s| lower.find(&s.to_string().to_lowercase()).map(|pos| (pos, s)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, s)| s)
            .unwrap_or_default()
    }
}

/// A reported problem tracked through the Open → In Progress → Resolved lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque unique identifier (e.g. `ISS-3F9A0C1B2D4E`).
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    /// Display name of the reporter.
    pub student_name: String,
    /// Identifier of the reporter.
    pub student_id: String,
    pub created_at: DateTime<Utc>,
    /// Attached once after classification; absent on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Partially filled issue form.
///
/// Every field is optional; [`IssueDraft::resolve`] applies the fallbacks used
/// when a field was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<IssueCategory>,
    pub priority: Option<IssuePriority>,
}

/// Draft with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDraft {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: IssuePriority,
}

impl IssueDraft {
    pub const DEFAULT_TITLE: &'static str = "Untitled";
    pub const DEFAULT_CATEGORY: IssueCategory = IssueCategory::Admin;
    pub const DEFAULT_PRIORITY: IssuePriority = IssuePriority::Medium;

    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: IssueCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: IssuePriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Description text handed to sentiment classification.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Form-level check: title and description must both be non-blank.
    ///
    /// The lifecycle manager itself accepts incomplete drafts; this is what
    /// the report form runs before submitting.
    pub fn validate(&self) -> crate::Result<()> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().is_empty();

        match (blank(&self.title), blank(&self.description)) {
            (false, false) => Ok(()),
            (true, true) => Err(crate::CampusError::validation(
                "title and description are required",
            )),
            (true, false) => Err(crate::CampusError::validation("title is required")),
            (false, true) => Err(crate::CampusError::validation("description is required")),
        }
    }

    pub fn resolve(self) -> ResolvedDraft {
        ResolvedDraft {
            title: self
                .title
                .unwrap_or_else(|| Self::DEFAULT_TITLE.to_string()),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or(Self::DEFAULT_CATEGORY),
            priority: self.priority.unwrap_or(Self::DEFAULT_PRIORITY),
        }
    }
}

/// Identity stamped on an issue at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub name: String,
    pub id: String,
}
