pub mod chat;
pub mod dashboard;
pub mod init;
pub mod issue;
pub mod session;

use anyhow::Result;
use campusdesk_core::issue::{Issue, IssuePriority, IssueStatus};
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Chooses between text and JSON rendering.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Prints `value` as pretty JSON and returns `true` in JSON mode;
    /// otherwise does nothing and returns `false`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if !self.json {
            return Ok(false);
        }
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(true)
    }
}

pub(crate) fn heading(text: &str) {
    println!("{}", format!("=== {text} ===").bright_magenta().bold());
}

pub(crate) fn status_label(status: IssueStatus) -> ColoredString {
    paint_status(status, status.to_string())
}

fn paint_status(status: IssueStatus, label: String) -> ColoredString {
    match status {
        IssueStatus::Open => label.red(),
        IssueStatus::InProgress => label.yellow(),
        IssueStatus::Resolved => label.green(),
    }
}

fn priority_label(priority: IssuePriority) -> ColoredString {
    paint_priority(priority, priority.to_string())
}

fn paint_priority(priority: IssuePriority, label: String) -> ColoredString {
    match priority {
        IssuePriority::High => label.bright_red(),
        IssuePriority::Medium => label.normal(),
        IssuePriority::Low => label.bright_black(),
    }
}

/// One-line ticket summary used by lists.
pub(crate) fn issue_line(issue: &Issue) {
    let sentiment = issue
        .sentiment
        .map(|s| format!(" [{s}]"))
        .unwrap_or_default();
    println!(
        "{}  {} {} {:<14} {}{}",
        issue.id.bright_cyan(),
        paint_status(issue.status, format!("{:<11}", issue.status.to_string())),
        paint_priority(issue.priority, format!("{:<6}", issue.priority.to_string())),
        issue.category.to_string(),
        issue.title,
        sentiment.bright_black(),
    );
}

pub(crate) fn issue_detail(issue: &Issue) {
    println!("{}  {}", issue.id.bright_cyan(), issue.title.bold());
    println!("  Status:    {}", status_label(issue.status));
    println!("  Priority:  {}", priority_label(issue.priority));
    println!("  Category:  {}", issue.category);
    println!("  Reporter:  {} ({})", issue.student_name, issue.student_id);
    println!("  Created:   {}", issue.created_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(sentiment) = issue.sentiment {
        println!("  Sentiment: {sentiment}");
    }
    if !issue.description.is_empty() {
        println!();
        for line in issue.description.lines() {
            println!("  {line}");
        }
    }
}
