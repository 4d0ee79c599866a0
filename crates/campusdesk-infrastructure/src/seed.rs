//! Built-in mock data: the initial issue and the campus catalog.

use std::collections::HashMap;

use campusdesk_core::catalog::{
    AttendancePeriod, AttendanceRecord, CatalogSource, Course, FeeRecord, FeeStatus,
    FeeTransaction, Lecture, LectureStatus, Mark, MaterialKind, Notice, NoticeKind,
    StudentAcademicDetail, StudyMaterial, SubjectAttendance,
};
use campusdesk_core::issue::{Issue, IssueCategory, IssuePriority, IssueStatus, Sentiment};
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;

/// Collection used when nothing was stored under `campus_issues` yet.
///
/// Timestamps are relative to the moment of seeding.
pub fn initial_issues() -> Vec<Issue> {
    vec![Issue {
        id: "ISS-101".to_string(),
        title: "Wi-Fi not working in Hostel A".to_string(),
        description:
            "The Wi-Fi in the west wing of Hostel A has been down since yesterday evening."
                .to_string(),
        category: IssueCategory::It,
        status: IssueStatus::Open,
        priority: IssuePriority::High,
        student_name: "Alex Student".to_string(),
        student_id: "STU-2024-0812".to_string(),
        created_at: Utc::now() - Duration::days(1),
        sentiment: Some(Sentiment::Frustrated),
    }]
}

/// [`CatalogSource`] over the static mock catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl CatalogSource for MockCatalog {
    fn notices(&self) -> &[Notice] {
        &NOTICES
    }

    fn resources(&self) -> &[StudyMaterial] {
        &RESOURCES
    }

    fn attendance(&self, period: AttendancePeriod) -> Option<&AttendanceRecord> {
        ATTENDANCE.get(&period)
    }

    fn fees(&self) -> &[FeeRecord] {
        &FEES
    }

    fn courses(&self) -> &[Course] {
        &COURSES
    }

    fn roster(&self, course_id: &str) -> &[StudentAcademicDetail] {
        ROSTER.get(course_id).map(Vec::as_slice).unwrap_or_default()
    }
}

static NOTICES: Lazy<Vec<Notice>> = Lazy::new(|| {
    vec![
        Notice {
            id: "N1".to_string(),
            title: "End Term Examination Schedule".to_string(),
            content: "The end-term examination schedule for Spring 2024 has been released."
                .to_string(),
            date: "Oct 24, 2024".to_string(),
            kind: NoticeKind::Urgent,
            full_text: Some(
                "All students are hereby informed that the End Term Theory Examinations for the \
                 session 2023-24 (Even Semester) are scheduled to commence from 1st December 2024. \
                 The detailed branch-wise date sheet has been uploaded to the student portal. \
                 Please ensure all your dues are cleared by 15th November to receive your hall \
                 tickets."
                    .to_string(),
            ),
        },
        Notice {
            id: "N2".to_string(),
            title: "Annual Tech Fest: Innovate 2024".to_string(),
            content: "Registration for the annual tech fest is now open.".to_string(),
            date: "Oct 22, 2024".to_string(),
            kind: NoticeKind::Event,
            full_text: Some(
                "Join us for Innovate 2024! This year we feature 15+ hackathons, robotic wars, \
                 and guest lectures from industry leaders. Prize pool of \u{20b9}5,00,000 up for \
                 grabs. Registration closes next Friday."
                    .to_string(),
            ),
        },
    ]
});

static RESOURCES: Lazy<Vec<StudyMaterial>> = Lazy::new(|| {
    vec![
        material("R1", "Data Structures & Algorithms Notes", "CS201", MaterialKind::Pdf, "2.4 MB"),
        material(
            "R2",
            "Database Management Lecture Series",
            "CS302",
            MaterialKind::Video,
            "45 mins",
        ),
    ]
});

static COURSES: Lazy<Vec<Course>> = Lazy::new(|| {
    vec![
        course("C1", "CS501", "Artificial Intelligence", "Semester 5", 65),
        course("C2", "CS302", "Database Management Systems", "Semester 3", 58),
        course("C3", "CS101", "Intro to Computer Science", "Semester 1", 120),
    ]
});

static ROSTER: Lazy<HashMap<&'static str, Vec<StudentAcademicDetail>>> = Lazy::new(|| {
    let ai = |theory, lab, ml| {
        vec![
            mark("AI (Theory)", theory, 100),
            mark("AI (Lab)", lab, 50),
            mark("ML Basics", ml, 100),
        ]
    };
    HashMap::from([
        (
            "C1",
            vec![
                student("2024-0812", "Alex J. Student", 82, ai(85, 42, 78)),
                student("2024-0944", "Jordan Smith", 95, ai(92, 48, 94)),
                student("2024-0102", "Casey Rivera", 68, ai(45, 30, 55)),
            ],
        ),
        (
            "C2",
            vec![student(
                "2022-0455",
                "Sam Taylor",
                88,
                vec![mark("DBMS Concepts", 72, 100), mark("SQL Lab", 45, 50)],
            )],
        ),
    ])
});

static FEES: Lazy<Vec<FeeRecord>> = Lazy::new(|| {
    vec![FeeRecord {
        id: "F1".to_string(),
        particulars: "Tuition Fee - Semester 5".to_string(),
        total_amount: 85000,
        paid_amount: 85000,
        due_date: "2024-08-15".to_string(),
        status: FeeStatus::Paid,
        transactions: vec![FeeTransaction {
            transaction_id: "TXN99821".to_string(),
            date: "2024-08-10".to_string(),
            amount: 85000,
            method: "Net Banking".to_string(),
        }],
    }]
});

static ATTENDANCE: Lazy<HashMap<AttendancePeriod, AttendanceRecord>> = Lazy::new(|| {
    use LectureStatus::{Attended, Missed};

    HashMap::from([
        (
            AttendancePeriod::Monthly,
            AttendanceRecord {
                period: "October".to_string(),
                overall_attended: 18,
                overall_total: 22,
                subjects: vec![
                    subject("AI", 5, 6, 83.0, &[("Oct 01", Attended), ("Oct 03", Attended)]),
                    subject("DBMS", 4, 5, 80.0, &[("Oct 02", Attended), ("Oct 04", Missed)]),
                    subject("ML", 9, 11, 81.0, &[]),
                ],
            },
        ),
        (
            AttendancePeriod::Semester,
            AttendanceRecord {
                period: "Semester 5".to_string(),
                overall_attended: 145,
                overall_total: 180,
                subjects: vec![
                    subject(
                        "AI (Theory)",
                        32,
                        40,
                        80.0,
                        &[("Oct 20", Attended), ("Oct 22", Missed), ("Oct 24", Attended)],
                    ),
                    subject("AI (Lab)", 18, 20, 90.0, &[("Oct 21", Attended)]),
                    subject("Machine Learning", 28, 40, 70.0, &[("Oct 19", Missed)]),
                    subject("Networks", 35, 40, 87.5, &[]),
                    subject("Cloud Comp.", 32, 40, 80.0, &[]),
                ],
            },
        ),
        (
            AttendancePeriod::Yearly,
            AttendanceRecord {
                period: "2024".to_string(),
                overall_attended: 320,
                overall_total: 400,
                subjects: vec![
                    subject("AI", 70, 80, 87.5, &[]),
                    subject("DBMS", 65, 80, 81.25, &[]),
                ],
            },
        ),
    ])
});

fn material(id: &str, title: &str, subject: &str, kind: MaterialKind, size: &str) -> StudyMaterial {
    StudyMaterial {
        id: id.to_string(),
        title: title.to_string(),
        subject: subject.to_string(),
        kind,
        url: "#".to_string(),
        file_size: Some(size.to_string()),
    }
}

fn course(id: &str, code: &str, name: &str, semester: &str, student_count: u32) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        semester: semester.to_string(),
        student_count,
    }
}

fn mark(subject: &str, score: u32, max_marks: u32) -> Mark {
    Mark {
        subject: subject.to_string(),
        score,
        max_marks,
    }
}

fn student(roll_no: &str, name: &str, attendance: u32, marks: Vec<Mark>) -> StudentAcademicDetail {
    StudentAcademicDetail {
        roll_no: roll_no.to_string(),
        name: name.to_string(),
        attendance,
        marks,
    }
}

/// An empty `history` slice means the registrar published none.
fn subject(
    name: &str,
    attended: u32,
    total: u32,
    percentage: f64,
    history: &[(&str, LectureStatus)],
) -> SubjectAttendance {
    SubjectAttendance {
        subject: name.to_string(),
        attended,
        total,
        percentage,
        history: (!history.is_empty()).then(|| {
            history
                .iter()
                .map(|(date, status)| Lecture {
                    date: date.to_string(),
                    status: *status,
                })
                .collect()
        }),
    }
}
