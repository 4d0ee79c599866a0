//! Read-only campus catalog: notices, study material, attendance, fees and
//! courses, with the arithmetic the dashboards show on top of them.

mod attendance;
mod course;
mod fee;
mod notice;

pub use attendance::{
    ATTENDANCE_THRESHOLD, AttendancePeriod, AttendanceRecord, Lecture, LectureStatus,
    SubjectAttendance, percentage,
};
pub use course::{Course, Mark, StudentAcademicDetail, search_roster};
pub use fee::{FeeRecord, FeeStatus, FeeSummary, FeeTransaction};
pub use notice::{MaterialKind, Notice, NoticeKind, StudyMaterial};

/// Source of the read-only campus catalog.
///
/// The dashboards only read through this trait; the shipped implementation
/// serves fixed mock data.
pub trait CatalogSource: Send + Sync {
    fn notices(&self) -> &[Notice];

    fn resources(&self) -> &[StudyMaterial];

    /// `None` when the period has no published record.
    fn attendance(&self, period: AttendancePeriod) -> Option<&AttendanceRecord>;

    fn fees(&self) -> &[FeeRecord];

    fn courses(&self) -> &[Course];

    /// Roster of a course; empty for unknown course ids.
    fn roster(&self, course_id: &str) -> &[StudentAcademicDetail];
}
