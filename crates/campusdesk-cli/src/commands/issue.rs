use anyhow::Result;
use campusdesk_core::CampusError;
use campusdesk_core::issue::{IssueCategory, IssueDraft, IssuePriority, IssueStatus};
use campusdesk_core::session::View;
use colored::Colorize;
use tracing::debug;

use super::{Output, heading, issue_detail, issue_line, status_label};
use crate::app::App;

pub async fn create(
    app: &App,
    out: &Output,
    title: String,
    description: String,
    category: Option<IssueCategory>,
    priority: Option<IssuePriority>,
) -> Result<()> {
    let role = app.enter(View::NewIssue).await?;

    let draft = IssueDraft {
        title: Some(title),
        description: Some(description),
        category,
        priority,
    };
    draft.validate()?;

    if !out.is_json() {
        println!("{}", "Analyzing and filing your report...".bright_black());
    }
    let issue = app.issues.create_issue(draft, role).await;
    if out.json(&issue)? {
        return Ok(());
    }

    println!("{} {}", "Reported".green().bold(), issue.id.bright_cyan());
    issue_detail(&issue);
    Ok(())
}

pub async fn list(
    app: &App,
    out: &Output,
    status: Option<IssueStatus>,
    search: &str,
) -> Result<()> {
    app.enter(View::Dashboard).await?;
    let issues = app.issues.filter(status, search).await;
    debug!(count = issues.len(), ?status, search, "Filtered issues");
    if out.json(&issues)? {
        return Ok(());
    }

    if issues.is_empty() {
        println!("{}", "No issues match.".bright_black());
    }
    issues.iter().for_each(issue_line);
    Ok(())
}

pub async fn show(app: &App, out: &Output, id: &str) -> Result<()> {
    app.enter(View::Dashboard).await?;
    let issue = app
        .issues
        .find(id)
        .await
        .ok_or_else(|| CampusError::not_found("issue", id))?;
    let next = app.issues.next_states(id).await.unwrap_or_default();
    if out.json(&serde_json::json!({ "issue": issue, "nextStates": next }))? {
        return Ok(());
    }

    issue_detail(&issue);
    if !next.is_empty() {
        let labels: Vec<String> = next.iter().map(|s| status_label(*s).to_string()).collect();
        println!();
        println!("  Can move to: {}", labels.join(", "));
    }
    Ok(())
}

/// An unknown id is reported but is not an error.
pub async fn set_status(app: &App, out: &Output, id: &str, status: IssueStatus) -> Result<()> {
    app.enter_as_admin(View::Dashboard).await?;

    match app.issues.update_status(id, status).await? {
        Some(issue) => {
            if !out.json(&issue)? {
                println!("{} is now {}", issue.id.bright_cyan(), status_label(issue.status));
            }
        }
        None => {
            if !out.json(&serde_json::Value::Null)? {
                println!("{}", format!("No issue with id {id}; nothing changed.").yellow());
            }
        }
    }
    Ok(())
}

pub async fn summary(app: &App, out: &Output) -> Result<()> {
    app.enter_as_admin(View::Dashboard).await?;

    if !out.is_json() {
        println!("{}", "Generating summary...".bright_black());
    }
    let summary = app.issues.summarize().await;
    if out.json(&serde_json::json!({ "summary": summary }))? {
        return Ok(());
    }

    heading("AI Summary");
    println!("{summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::config::AppConfig;
    use campusdesk_core::session::Role;
    use campusdesk_infrastructure::CampusPaths;
    use tempfile::TempDir;

    async fn app(dir: &TempDir) -> App {
        let mut config = AppConfig::default();
        config.session.login_delay_ms = 0;
        App::bootstrap(CampusPaths::rooted(dir.path()), config, true)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_student_cannot_triage() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).await;
        let out = Output::new(true);
        app.session.login(Role::Student).await;

        let err = set_status(&app, &out, "ISS-101", IssueStatus::Resolved)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("staff only"));
        assert_eq!(app.issues.find("ISS-101").await.unwrap().status, IssueStatus::Open);
    }

    #[tokio::test]
    async fn test_admin_triage_and_unknown_id() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).await;
        let out = Output::new(true);
        app.session.login(Role::Admin).await;

        set_status(&app, &out, "ISS-101", IssueStatus::InProgress).await.unwrap();
        assert_eq!(
            app.issues.find("ISS-101").await.unwrap().status,
            IssueStatus::InProgress
        );

        let before = app.issues.issues().await;
        set_status(&app, &out, "ISS-404", IssueStatus::Resolved).await.unwrap();
        assert_eq!(app.issues.issues().await, before);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_form() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).await;
        let out = Output::new(true);
        app.session.login(Role::Student).await;

        let err = create(&app, &out, "  ".to_string(), "D".to_string(), None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("title is required"));
        assert_eq!(app.issues.issues().await.len(), 1);
    }
}
