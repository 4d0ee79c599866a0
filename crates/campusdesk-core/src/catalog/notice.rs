use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum NoticeKind {
    Urgent,
    General,
    Event,
}

/// A campus announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    /// One-line teaser.
    pub content: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

impl Notice {
    /// Full announcement text, falling back to the teaser.
    pub fn body(&self) -> &str {
        self.full_text.as_deref().unwrap_or(&self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MaterialKind {
    #[serde(rename = "PDF")]
    #[strum(to_string = "PDF")]
    Pdf,
    Video,
    Link,
}

/// A downloadable study resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
}
