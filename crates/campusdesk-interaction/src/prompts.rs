//! System instructions, generation profiles and prompt templates.

use campusdesk_core::chat::ChatPanel;
use campusdesk_core::config::GeminiSettings;
use campusdesk_core::issue::Issue;
use minijinja::{Environment, context};

pub const CAMPUS_KNOWLEDGE_BASE: &str = "\
You are the Smart Campus AI Oracle. You have exhaustive knowledge of the College Rules, \
Regulations, and Administrative Procedures.
Key regulations you answer from:
- Attendance: a minimum of 75% attendance per subject is required to sit for end-term \
examinations. Shortage below 65% cannot be condoned.
- Examinations: hall tickets are issued only after all dues are cleared. Revaluation requests \
must be filed within 7 days of result publication through the student portal, with the \
prescribed fee per paper.
- IT services: campus Wi-Fi uses the student ID as login; connectivity issues are reported \
through the helpdesk ticket form under the IT category.
- Library: open 8:00 AM to 10:00 PM on weekdays and 9:00 AM to 5:00 PM on weekends.
- Hostel: maintenance requests are raised through the ticket form under Infrastructure and \
are attended within 48 hours.
Answer precisely, cite the relevant rule, and point the student to the right office or form \
when an action is needed. If a question falls outside campus matters, say so briefly.";

pub const PRO_SYSTEM_PROMPT: &str = "\
You are the Campus Pro AI, an elite intelligent assistant powered by the latest large language \
model technology.
Your goal is to provide world-class reasoning, creative writing, and technical problem-solving \
for college students.
Capabilities:
- Solve complex mathematics, physics, and engineering problems step-by-step.
- Write, debug, and explain code in any language.
- Summarize long academic papers and extract key insights.
- Provide career advice, essay feedback, and creative brainstorming.
- Vision Support: Analyze uploaded images of charts, handwritten notes, or diagrams.
Tone: Sophisticated, highly intelligent, helpful, and concise.
Format: Use Markdown for all structures (bullet points, bold text, code blocks).";

pub const SUMMARY_SYSTEM_INSTRUCTION: &str =
    "You are a senior campus administrator summarizing student issues.";

/// Prompt text sent with an attachment when the user typed nothing.
pub const ATTACHMENT_DEFAULT_PROMPT: &str =
    "Please provide a comprehensive analysis of the attached material.";

const SENTIMENT_TEMPLATE: &str = r#"Analyze the sentiment of this student complaint: "{{ text }}". Categorize it as "Frustrated", "Neutral", or "Urgent". Reply with ONLY the category name."#;

const SUMMARY_TEMPLATE: &str = "Based on the following student complaints, provide a concise summary of the top 5 most critical problems currently affecting students and suggest one actionable improvement for the administration.

Issues:
{% for issue in issues -%}
- [{{ issue.category }}] {{ issue.title }}: {{ issue.description }} (Status: {{ issue.status }})
{% endfor %}";

/// Generation parameters of one kind of request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProfile {
    pub model: String,
    pub system_instruction: Option<&'static str>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub thinking_budget: Option<u32>,
}

impl GenerationProfile {
    pub fn for_panel(panel: ChatPanel, settings: &GeminiSettings) -> Self {
        match panel {
            ChatPanel::Helpdesk => Self {
                model: settings.chat_model.clone(),
                system_instruction: Some(CAMPUS_KNOWLEDGE_BASE),
                temperature: Some(0.2),
                top_p: Some(0.8),
                thinking_budget: None,
            },
            ChatPanel::Pro => Self {
                model: settings.pro_model.clone(),
                system_instruction: Some(PRO_SYSTEM_PROMPT),
                temperature: Some(0.4),
                top_p: None,
                thinking_budget: Some(16000),
            },
        }
    }

    pub fn sentiment(settings: &GeminiSettings) -> Self {
        Self {
            model: settings.flash_model.clone(),
            system_instruction: None,
            temperature: None,
            top_p: None,
            thinking_budget: None,
        }
    }

    pub fn summary(settings: &GeminiSettings) -> Self {
        Self {
            system_instruction: Some(SUMMARY_SYSTEM_INSTRUCTION),
            ..Self::sentiment(settings)
        }
    }
}

pub fn sentiment_prompt(text: &str) -> Result<String, minijinja::Error> {
    Environment::new().render_str(SENTIMENT_TEMPLATE, context! { text => text })
}

pub fn summary_prompt(issues: &[Issue]) -> Result<String, minijinja::Error> {
    let rows: Vec<_> = issues
        .iter()
        .map(|i| {
            context! {
                category => i.category.to_string(),
                title => &i.title,
                description => &i.description,
                status => i.status.to_string(),
            }
        })
        .collect();
    Environment::new().render_str(SUMMARY_TEMPLATE, context! { issues => rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::issue::{IssueCategory, IssuePriority, IssueStatus};
    use chrono::Utc;

    #[test]
    fn test_sentiment_prompt() {
        let prompt = sentiment_prompt("The projector is broken again").unwrap();
        assert_eq!(
            prompt,
            "Analyze the sentiment of this student complaint: \"The projector is broken again\". \
             Categorize it as \"Frustrated\", \"Neutral\", or \"Urgent\". Reply with ONLY the category name."
        );
    }

    #[test]
    fn test_summary_prompt_lists_issues() {
        let issue = Issue {
            id: "ISS-1".to_string(),
            title: "Wi-Fi".to_string(),
            description: "down since Monday".to_string(),
            category: IssueCategory::It,
            status: IssueStatus::InProgress,
            priority: IssuePriority::High,
            student_name: "Alex Student".to_string(),
            student_id: "STU-2024-0812".to_string(),
            created_at: Utc::now(),
            sentiment: None,
        };

        let prompt = summary_prompt(&[issue]).unwrap();

        assert!(prompt.starts_with("Based on the following student complaints"));
        assert!(
            prompt.contains("\n\nIssues:\n- [IT] Wi-Fi: down since Monday (Status: In Progress)")
        );
    }

    #[test]
    fn test_panel_profiles() {
        let settings = GeminiSettings::default();
        let pro = GenerationProfile::for_panel(ChatPanel::Pro, &settings);
        assert_eq!(pro.thinking_budget, Some(16000));
        assert_eq!(pro.model, "gemini-3-pro-preview");

        let help = GenerationProfile::for_panel(ChatPanel::Helpdesk, &settings);
        assert_eq!(help.top_p, Some(0.8));

        let summary = GenerationProfile::summary(&settings);
        assert_eq!(summary.model, "gemini-3-flash-preview");
        assert_eq!(summary.system_instruction, Some(SUMMARY_SYSTEM_INSTRUCTION));
    }
}
