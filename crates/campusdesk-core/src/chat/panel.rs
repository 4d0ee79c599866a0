//! The two AI chat panels and their canned texts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::message::ChatMessage;

/// Attachment types the pro assistant accepts.
pub const ALLOWED_ATTACHMENT_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

/// A preset question offered by the helpdesk panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickProblem {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_PROBLEMS: &[QuickProblem] = &[
    QuickProblem {
        id: "attendance",
        label: "Attendance Rules",
        prompt: "Tell me about the campus attendance rules and eligibility criteria.",
    },
    QuickProblem {
        id: "exams",
        label: "Exam Eligibility",
        prompt: "What are the requirements to sit for final exams?",
    },
    QuickProblem {
        id: "wifi",
        label: "Wi-Fi/IT Issues",
        prompt: "I am having trouble with the campus Wi-Fi. How do I fix it?",
    },
    QuickProblem {
        id: "library",
        label: "Library Timings",
        prompt: "What are the library opening and closing hours?",
    },
    QuickProblem {
        id: "hostel",
        label: "Hostel Maintenance",
        prompt: "How do I report a maintenance issue in the hostel?",
    },
    QuickProblem {
        id: "reval",
        label: "Revaluation Process",
        prompt: "How can I apply for paper revaluation?",
    },
];

pub fn quick_problem(id: &str) -> Option<&'static QuickProblem> {
    QUICK_PROBLEMS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Which chat panel a conversation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ChatPanel {
    /// Campus rules helpdesk; transcript lives only for the session.
    Helpdesk,
    /// General-purpose assistant with attachments; transcript is persisted.
    Pro,
}

impl ChatPanel {
    /// Opening transcript of a fresh panel.
    pub fn initial_transcript(self) -> Vec<ChatMessage> {
        let greeting = match self {
            Self::Helpdesk => {
                "Hi! I'm your Smart Campus Assistant. Please select a category below or choose 'Other' to type your specific problem."
            }
            Self::Pro => {
                "Welcome to the Pro AI Assistant. I am equipped with deep reasoning capabilities to help you with your most complex academic and creative challenges. How can I assist you today?"
            }
        };
        vec![ChatMessage::model(greeting)]
    }

    /// Transcript after the user clears the panel.
    pub fn cleared_transcript(self) -> Vec<ChatMessage> {
        match self {
            Self::Helpdesk => vec![ChatMessage::model("Hi! How can I help you today?")],
            Self::Pro => Vec::new(),
        }
    }

    /// Reply shown when the gateway call fails.
    pub fn failure_reply(self) -> &'static str {
        match self {
            Self::Helpdesk => "Sorry, I'm having trouble connecting right now. Please try again.",
            Self::Pro => {
                "I encountered an error processing that complex request. Please try a simpler prompt or check your file."
            }
        }
    }

    /// Reply shown when the model answers with no text.
    pub fn empty_reply(self) -> &'static str {
        match self {
            Self::Helpdesk => "I'm sorry, I couldn't process that. Please try again.",
            Self::Pro => "My analysis is complete. Is there a specific detail you'd like to dive into?",
        }
    }

    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Pro)
    }

    pub fn accepts_attachments(self) -> bool {
        matches!(self, Self::Pro)
    }
}
