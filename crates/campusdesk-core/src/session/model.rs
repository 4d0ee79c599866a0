//! Session domain models: roles, views and the navigation they unlock.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::issue::Reporter;

/// Capability class of the acting session.
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
pub enum Role {
    #[default]
    Student,
    /// Teacher or staff member.
    #[strum(to_string = "Admin", serialize = "teacher", serialize = "staff")]
    Admin,
}

impl Role {
    /// Canned identity stamped on issues reported from this role.
    pub fn reporter(self) -> Reporter {
        match self {
            Self::Student => Reporter {
                name: "Alex Student".to_string(),
                id: "STU-2024-0812".to_string(),
            },
            Self::Admin => Reporter {
                name: "Administrator".to_string(),
                id: "ADMIN-001".to_string(),
            },
        }
    }

    pub fn email(self) -> &'static str {
        match self {
            Self::Student => "alex.s@college.edu",
            Self::Admin => "admin@college.edu",
        }
    }

    /// Label shown in the sidebar profile block.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Admin => "Teacher/Staff",
        }
    }
}

/// A top-level panel of the dashboard.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    Dashboard,
    Attendance,
    Fees,
    StudyAi,
    Chatbot,
    NewIssue,
    TeacherAcademic,
    Analytics,
}

/// One entry of the role-specific sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
}

impl NavItem {
    const fn new(view: View, label: &'static str) -> Self {
        Self { view, label }
    }
}

const STUDENT_NAV: &[NavItem] = &[
    NavItem::new(View::Dashboard, "Dashboard"),
    NavItem::new(View::Attendance, "Attendance"),
    NavItem::new(View::Fees, "Fees & Payments"),
    NavItem::new(View::StudyAi, "Pro AI Assistant"),
    NavItem::new(View::Chatbot, "AI Helpdesk"),
    NavItem::new(View::NewIssue, "Report Issue"),
];

const ADMIN_NAV: &[NavItem] = &[
    NavItem::new(View::Dashboard, "Tickets Hub"),
    NavItem::new(View::TeacherAcademic, "My Courses"),
    NavItem::new(View::Analytics, "Analytics"),
    NavItem::new(View::Chatbot, "AI Assistant"),
];

/// Sidebar entries reachable by `role`, in display order.
pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => STUDENT_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

/// Authentication state of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub authenticated: bool,
    pub role: Role,
    pub active_view: View,
}

/// What the session store remembers between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub authenticated: bool,
    /// `None` when no role was ever stored.
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_accepts_aliases() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("Teacher".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
    }

    #[test]
    fn test_reporter_identity_per_role() {
        assert_eq!(Role::Student.reporter().id, "STU-2024-0812");
        assert_eq!(Role::Admin.reporter().name, "Administrator");
    }

    #[test]
    fn test_view_ids_are_kebab_case() {
        assert_eq!(View::StudyAi.to_string(), "study-ai");
        assert_eq!("teacher-academic".parse::<View>().unwrap(), View::TeacherAcademic);
    }

    #[test]
    fn test_nav_items_per_role() {
        let student: Vec<View> = nav_items(Role::Student).iter().map(|n| n.view).collect();
        assert!(student.contains(&View::Fees));
        assert!(!student.contains(&View::Analytics));

        let admin = nav_items(Role::Admin);
        assert_eq!(admin[0].label, "Tickets Hub");
        assert!(!admin.iter().any(|n| n.view == View::NewIssue));
    }
}
