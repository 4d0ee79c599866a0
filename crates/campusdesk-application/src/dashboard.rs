//! Read models for the dashboard panels.

use std::sync::Arc;

use campusdesk_core::catalog::{
    AttendancePeriod, AttendanceRecord, CatalogSource, Course, FeeRecord, FeeSummary, Notice,
    StudentAcademicDetail, StudyMaterial, search_roster,
};
use campusdesk_core::issue::{Breakdown, Issue, IssueStats};
use campusdesk_core::{CampusError, Result};
use serde::Serialize;

/// Student landing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub stats: IssueStats,
    /// The student's most recent reports.
    pub recent_issues: Vec<Issue>,
    pub notices: Vec<Notice>,
    pub resources: Vec<StudyMaterial>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub period: AttendancePeriod,
    pub overall_percentage: f64,
    /// Subjects below the attendance threshold.
    pub shortages: Vec<String>,
    pub record: AttendanceRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStatement {
    pub summary: FeeSummary,
    pub records: Vec<FeeRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub student: StudentAcademicDetail,
    pub marks_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRoster {
    pub course: Course,
    pub rows: Vec<RosterRow>,
}

/// Admin analytics page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub stats: IssueStats,
    pub breakdown: Breakdown,
}

const RECENT_ISSUES: usize = 5;

pub struct DashboardService {
    catalog: Arc<dyn CatalogSource>,
}

impl DashboardService {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self { catalog }
    }

    /// `student_id` selects whose reports appear under recent issues.
    pub fn student_overview(&self, issues: &[Issue], student_id: &str) -> StudentOverview {
        StudentOverview {
            stats: IssueStats::of(issues),
            recent_issues: issues
                .iter()
                .filter(|issue| issue.student_id == student_id)
                .take(RECENT_ISSUES)
                .cloned()
                .collect(),
            notices: self.catalog.notices().to_vec(),
            resources: self.catalog.resources().to_vec(),
        }
    }

    pub fn notice(&self, id: &str) -> Result<Notice> {
        self.catalog
            .notices()
            .iter()
            .find(|notice| notice.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or_else(|| CampusError::not_found("notice", id))
    }

    pub fn attendance(&self, period: AttendancePeriod) -> Result<AttendanceReport> {
        let record = self
            .catalog
            .attendance(period)
            .ok_or_else(|| CampusError::not_found("attendance record", period.to_string()))?;

        Ok(AttendanceReport {
            period,
            overall_percentage: record.overall_percentage(),
            shortages: record.shortages().map(|s| s.subject.clone()).collect(),
            record: record.clone(),
        })
    }

    pub fn fees(&self) -> FeeStatement {
        let records = self.catalog.fees().to_vec();
        FeeStatement {
            summary: FeeSummary::of(&records),
            records,
        }
    }

    pub fn courses(&self) -> Vec<Course> {
        self.catalog.courses().to_vec()
    }

    /// Roster of a course (by id or code), filtered by name or roll number.
    pub fn roster(&self, course: &str, search: &str) -> Result<CourseRoster> {
        let course = self
            .catalog
            .courses()
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(course) || c.code.eq_ignore_ascii_case(course))
            .cloned()
            .ok_or_else(|| CampusError::not_found("course", course))?;

        let rows = search_roster(self.catalog.roster(&course.id), search)
            .into_iter()
            .map(|student| RosterRow {
                marks_percentage: student.marks_percentage(),
                student: student.clone(),
            })
            .collect();

        Ok(CourseRoster { course, rows })
    }

    pub fn analytics(&self, issues: &[Issue]) -> Analytics {
        Analytics {
            stats: IssueStats::of(issues),
            breakdown: Breakdown::of(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_infrastructure::{MockCatalog, seed};

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(MockCatalog))
    }

    #[test]
    fn test_student_overview() {
        let issues = seed::initial_issues();
        let overview = service().student_overview(&issues, "STU-2024-0812");
        assert_eq!(overview.stats.pending(), 1);
        assert_eq!(overview.recent_issues.len(), 1);
        assert_eq!(overview.notices.len(), 2);

        let other = service().student_overview(&issues, "ADMIN-001");
        assert!(other.recent_issues.is_empty());
    }

    #[test]
    fn test_attendance_report() {
        let report = service().attendance(AttendancePeriod::Semester).unwrap();
        assert!((report.overall_percentage - 80.555).abs() < 0.01);
        assert_eq!(report.shortages, vec!["Machine Learning".to_string()]);

        let monthly = service().attendance(AttendancePeriod::Monthly).unwrap();
        assert!(monthly.shortages.is_empty());
    }

    #[test]
    fn test_fee_statement() {
        let statement = service().fees();
        assert_eq!(statement.summary.total_payable, 85000);
        assert_eq!(statement.summary.total_outstanding, 0);
    }

    #[test]
    fn test_roster_by_code_and_search() {
        let roster = service().roster("cs501", "casey").unwrap();
        assert_eq!(roster.course.id, "C1");
        assert_eq!(roster.rows.len(), 1);
        assert!((roster.rows[0].marks_percentage - 52.0).abs() < 0.01);

        assert_eq!(service().roster("C1", "").unwrap().rows.len(), 3);
        assert!(service().roster("C9", "").unwrap_err().is_not_found());
    }

    #[test]
    fn test_notice_lookup() {
        assert!(service().notice("n1").unwrap().full_text.is_some());
        assert!(service().notice("N7").is_err());
    }
}
