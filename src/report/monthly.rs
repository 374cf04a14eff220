use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

use super::ReportPeriod;
use crate::error::AppError;
use crate::model::{Attendance, AttendanceStatus, Student};
use crate::store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct AttendanceStats {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    /// Percent of the month's days marked present, one decimal place
    #[schema(example = 66.7)]
    pub attendance_rate: f64,
}

impl AttendanceStats {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a Attendance>, total_days: u32) -> Self {
        let mut stats = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
            }
        }
        stats.attendance_rate = attendance_rate(stats.present, total_days);
        stats
    }
}

/// `present / total_days * 100` rounded to one decimal; 0 when there are no days.
pub fn attendance_rate(present: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    let percent = f64::from(present) / f64::from(total_days) * 100.0;
    (percent * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayEntry {
    #[schema(example = 4)]
    pub day: u32,
    #[schema(example = "2024-03-04", value_type = String, format = "date")]
    pub date: NaiveDate,
    /// `None` when nothing was marked that day
    pub record: Option<Attendance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentReport {
    pub student: Student,
    pub days: Vec<DayEntry>,
    pub stats: AttendanceStats,
}

impl StudentReport {
    /// Joins `records` onto `days`. Statistics count every record given, so callers
    /// pass only records that fall inside the month.
    pub fn build(student: Student, records: Vec<Attendance>, days: &[NaiveDate]) -> Self {
        let stats = AttendanceStats::tally(&records, days.len() as u32);

        let mut by_date: HashMap<NaiveDate, Attendance> =
            records.into_iter().map(|r| (r.date, r)).collect();

        let days = days
            .iter()
            .map(|&date| DayEntry {
                day: date.day(),
                date,
                record: by_date.remove(&date),
            })
            .collect();

        Self {
            student,
            days,
            stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub period: ReportPeriod,
    #[schema(example = "March")]
    pub month_name: String,
    #[schema(example = 31)]
    pub total_days: u32,
    /// Every date of the month, day 1 first
    #[schema(value_type = Vec<String>, example = json!(["2024-03-01", "2024-03-02"]))]
    pub days: Vec<NaiveDate>,
    pub students: Vec<StudentReport>,
}

impl MonthlyReport {
    /// Groups a month's records by student and builds one entry per student, in the
    /// order `students` is given.
    pub fn assemble(period: ReportPeriod, students: Vec<Student>, records: Vec<Attendance>) -> Self {
        let days = period.days();
        let (first, last) = (period.first_day(), period.last_day());

        let mut by_student: HashMap<i64, Vec<Attendance>> = HashMap::new();
        for record in records.into_iter().filter(|r| (first..=last).contains(&r.date)) {
            by_student.entry(record.student_id).or_default().push(record);
        }

        let students = students
            .into_iter()
            .map(|student| {
                let records = by_student.remove(&student.id).unwrap_or_default();
                StudentReport::build(student, records, &days)
            })
            .collect();

        Self {
            period,
            month_name: period.month_name().to_string(),
            total_days: days.len() as u32,
            days,
            students,
        }
    }

    pub fn day_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.total_days
    }
}

/// Builds the report for every student in the directory.
pub async fn monthly(pool: &SqlitePool, period: ReportPeriod) -> Result<MonthlyReport, AppError> {
    let students = store::students::list_all(pool).await?;
    let records =
        store::attendance::between(pool, period.first_day(), period.last_day(), None).await?;

    debug!(
        year = period.year,
        month = period.month,
        students = students.len(),
        records = records.len(),
        "Building monthly report"
    );

    Ok(MonthlyReport::assemble(period, students, records))
}

/// Builds the report for a single student.
pub async fn student_month(
    pool: &SqlitePool,
    student_id: i64,
    period: ReportPeriod,
) -> Result<StudentReport, AppError> {
    let student = store::students::get(pool, student_id).await?;
    let records =
        store::attendance::between(pool, period.first_day(), period.last_day(), Some(student_id))
            .await?;

    Ok(StudentReport::build(student, records, &period.days()))
}
