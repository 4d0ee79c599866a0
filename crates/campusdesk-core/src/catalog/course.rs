use serde::{Deserialize, Serialize};

use super::attendance::percentage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub semester: String,
    pub student_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub subject: String,
    pub score: u32,
    pub max_marks: u32,
}

/// A student's row in a course roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAcademicDetail {
    pub roll_no: String,
    pub name: String,
    /// Attendance in whole percent.
    pub attendance: u32,
    pub marks: Vec<Mark>,
}

impl StudentAcademicDetail {
    /// Aggregate score across all assessments, in percent.
    pub fn marks_percentage(&self) -> f64 {
        let scored = self.marks.iter().map(|m| m.score).sum();
        let max = self.marks.iter().map(|m| m.max_marks).sum();
        percentage(scored, max)
    }
}

/// Roster search: name (case-insensitive) or roll number substring.
pub fn search_roster<'a>(
    roster: &'a [StudentAcademicDetail],
    term: &str,
) -> Vec<&'a StudentAcademicDetail> {
    let needle = term.to_lowercase();
    roster
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle) || s.roll_no.contains(term))
        .collect()
}
