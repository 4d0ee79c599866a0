//! Read-only dashboard panels.

use anyhow::Result;
use campusdesk_core::CampusError;
use campusdesk_core::catalog::{
    ATTENDANCE_THRESHOLD, AttendancePeriod, LectureStatus, SubjectAttendance,
};
use campusdesk_core::issue::{Bucket, IssueStats};
use campusdesk_core::session::{Role, View};
use colored::Colorize;

use super::{Output, heading, issue_line};
use crate::app::App;

fn stats_line(stats: &IssueStats) {
    println!(
        "Total {}  Open {}  In Progress {}  Resolved {}  Pending {}",
        stats.total.to_string().bold(),
        stats.open.to_string().red(),
        stats.in_progress.to_string().yellow(),
        stats.resolved.to_string().green(),
        stats.pending().to_string().bold(),
    );
}

fn percent(value: f64, shortage: bool) -> String {
    let text = format!("{value:.1}%");
    if shortage {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub async fn overview(app: &App, out: &Output) -> Result<()> {
    let role = app.enter(View::Dashboard).await?;
    let issues = app.issues.issues().await;

    match role {
        Role::Student => {
            let overview = app
                .dashboard
                .student_overview(&issues, &role.reporter().id);
            if out.json(&overview)? {
                return Ok(());
            }

            heading("Student Dashboard");
            stats_line(&overview.stats);

            println!();
            println!("{}", "My recent reports".bold());
            if overview.recent_issues.is_empty() {
                println!("  {}", "Nothing reported yet.".bright_black());
            }
            overview.recent_issues.iter().for_each(issue_line);

            println!();
            println!("{}", "Notices".bold());
            for notice in &overview.notices {
                println!(
                    "  {} {} [{}] {}",
                    notice.id.bright_cyan(),
                    notice.date.bright_black(),
                    notice.kind,
                    notice.title
                );
                println!("     {}", notice.content.bright_black());
            }

            println!();
            println!("{}", "Study resources".bold());
            for resource in &overview.resources {
                let size = resource.file_size.as_deref().unwrap_or("-");
                println!(
                    "  {} {:<5} {} ({}, {})",
                    resource.id.bright_cyan(),
                    resource.kind.to_string(),
                    resource.title,
                    resource.subject,
                    size
                );
            }
        }
        Role::Admin => {
            let stats = app.issues.stats().await;
            if out.json(&serde_json::json!({ "stats": stats, "issues": issues }))? {
                return Ok(());
            }

            heading("Tickets Hub");
            stats_line(&stats);
            println!();
            issues.iter().for_each(issue_line);
        }
    }
    Ok(())
}

pub async fn notice(app: &App, out: &Output, id: &str) -> Result<()> {
    app.enter(View::Dashboard).await?;
    let notice = app.dashboard.notice(id)?;
    if out.json(&notice)? {
        return Ok(());
    }

    heading(&notice.title);
    println!("{} [{}]", notice.date.bright_black(), notice.kind);
    println!();
    println!("{}", notice.body());
    Ok(())
}

fn history(subject: &SubjectAttendance) {
    if subject.history().is_empty() {
        println!("  {}", "No lecture history recorded.".bright_black());
    }
    for lecture in subject.history() {
        let status = match lecture.status {
            LectureStatus::Attended => lecture.status.to_string().green(),
            LectureStatus::Missed => lecture.status.to_string().red(),
        };
        println!("  {:<8} {}", lecture.date, status);
    }
}

pub async fn attendance(
    app: &App,
    out: &Output,
    period: AttendancePeriod,
    subject: Option<&str>,
) -> Result<()> {
    app.enter(View::Attendance).await?;
    let report = app.dashboard.attendance(period)?;

    if let Some(name) = subject {
        let subject = report
            .record
            .subject(name)
            .ok_or_else(|| CampusError::not_found("subject", name))?;
        if out.json(subject)? {
            return Ok(());
        }
        heading(&subject.subject);
        println!(
            "{}/{} lectures, {}",
            subject.attended,
            subject.total,
            percent(subject.percentage, subject.is_shortage())
        );
        history(subject);
        return Ok(());
    }

    if out.json(&report)? {
        return Ok(());
    }

    heading(&format!("Attendance - {}", report.record.period));
    println!(
        "Overall {}/{} lectures, {}",
        report.record.overall_attended,
        report.record.overall_total,
        percent(report.overall_percentage, report.overall_percentage < ATTENDANCE_THRESHOLD)
    );
    println!();
    for subject in &report.record.subjects {
        println!(
            "  {:<18} {:>3}/{:<3} {}",
            subject.subject,
            subject.attended,
            subject.total,
            percent(subject.percentage, subject.is_shortage())
        );
    }
    if !report.shortages.is_empty() {
        println!();
        println!(
            "{} below {ATTENDANCE_THRESHOLD}%: {}",
            "Shortage".red().bold(),
            report.shortages.join(", ")
        );
    }
    Ok(())
}

pub async fn fees(app: &App, out: &Output) -> Result<()> {
    app.enter(View::Fees).await?;
    let statement = app.dashboard.fees();
    if out.json(&statement)? {
        return Ok(());
    }

    heading("Fees & Payments");
    println!(
        "Payable {}  Paid {}  Outstanding {}",
        statement.summary.total_payable,
        statement.summary.total_paid.to_string().green(),
        statement.summary.total_outstanding.to_string().red(),
    );
    for record in &statement.records {
        println!();
        println!(
            "{} {} [{}] due {}",
            record.id.bright_cyan(),
            record.particulars.bold(),
            record.status,
            record.due_date
        );
        println!(
            "  {} of {} paid, {} outstanding",
            record.paid_amount,
            record.total_amount,
            record.outstanding()
        );
        for txn in &record.transactions {
            println!(
                "  {} {} {} via {}",
                txn.transaction_id.bright_black(),
                txn.date,
                txn.amount,
                txn.method
            );
        }
    }
    Ok(())
}

pub async fn courses(app: &App, out: &Output) -> Result<()> {
    app.enter(View::TeacherAcademic).await?;
    let courses = app.dashboard.courses();
    if out.json(&courses)? {
        return Ok(());
    }

    heading("My Courses");
    for course in &courses {
        println!(
            "  {} {:<6} {:<30} {:<11} {} students",
            course.id.bright_cyan(),
            course.code,
            course.name,
            course.semester,
            course.student_count
        );
    }
    Ok(())
}

pub async fn roster(app: &App, out: &Output, course: &str, search: &str) -> Result<()> {
    app.enter(View::TeacherAcademic).await?;
    let roster = app.dashboard.roster(course, search)?;
    if out.json(&roster)? {
        return Ok(());
    }

    heading(&format!("{} {}", roster.course.code, roster.course.name));
    if roster.rows.is_empty() {
        println!("{}", "No students match.".bright_black());
    }
    for row in &roster.rows {
        let student = &row.student;
        println!(
            "  {:<10} {:<18} attendance {}  marks {}",
            student.roll_no,
            student.name,
            percent(
                f64::from(student.attendance),
                f64::from(student.attendance) < ATTENDANCE_THRESHOLD
            ),
            format!("{:.1}%", row.marks_percentage).bold()
        );
        for mark in &student.marks {
            println!(
                "      {:<16} {}/{}",
                mark.subject.bright_black(),
                mark.score,
                mark.max_marks
            );
        }
    }
    Ok(())
}

fn buckets(title: &str, buckets: &[Bucket]) {
    println!("{}", title.bold());
    let widest = buckets.iter().map(|b| b.value).max().unwrap_or(0).max(1);
    for bucket in buckets {
        let bar = "#".repeat(bucket.value * 20 / widest);
        println!("  {:<16} {:>3} {}", bucket.name, bucket.value, bar.bright_blue());
    }
}

pub async fn analytics(app: &App, out: &Output) -> Result<()> {
    app.enter(View::Analytics).await?;
    let issues = app.issues.issues().await;
    let analytics = app.dashboard.analytics(&issues);
    if out.json(&analytics)? {
        return Ok(());
    }

    heading("Analytics");
    stats_line(&analytics.stats);
    println!();
    buckets("By category", &analytics.breakdown.by_category);
    buckets("By status", &analytics.breakdown.by_status);
    buckets("By sentiment", &analytics.breakdown.by_sentiment);
    Ok(())
}
