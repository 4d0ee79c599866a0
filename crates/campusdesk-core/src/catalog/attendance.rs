use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Attendance below this percentage is flagged as a shortage.
pub const ATTENDANCE_THRESHOLD: f64 = 75.0;

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttendancePeriod {
    Monthly,
    #[default]
    Semester,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum LectureStatus {
    Attended,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub date: String,
    pub status: LectureStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub subject: String,
    pub attended: u32,
    pub total: u32,
    /// Percentage as published by the registrar (may be rounded).
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Lecture>>,
}

impl SubjectAttendance {
    pub fn is_shortage(&self) -> bool {
        self.percentage < ATTENDANCE_THRESHOLD
    }

    pub fn history(&self) -> &[Lecture] {
        self.history.as_deref().unwrap_or_default()
    }
}

/// Attendance for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Human label, e.g. "October" or "Semester 5".
    pub period: String,
    pub overall_attended: u32,
    pub overall_total: u32,
    pub subjects: Vec<SubjectAttendance>,
}

impl AttendanceRecord {
    /// Overall attendance in percent; zero when no lecture was held.
    pub fn overall_percentage(&self) -> f64 {
        percentage(self.overall_attended, self.overall_total)
    }

    pub fn shortages(&self) -> impl Iterator<Item = &SubjectAttendance> {
        self.subjects.iter().filter(|s| s.is_shortage())
    }

    pub fn subject(&self, name: &str) -> Option<&SubjectAttendance> {
        self.subjects
            .iter()
            .find(|s| s.subject.eq_ignore_ascii_case(name))
    }
}

pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    f64::from(part) * 100.0 / f64::from(whole)
}
