use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::{Attendance, Student};
use crate::store;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyEntry {
    pub student: Student,
    pub attendance: Option<Attendance>,
}

/// Every student alongside their mark for one date.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailySheet {
    #[schema(example = "2024-03-04", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub entries: Vec<DailyEntry>,
}

impl DailySheet {
    pub fn assemble(date: NaiveDate, students: Vec<Student>, records: Vec<Attendance>) -> Self {
        let mut by_student: HashMap<i64, Attendance> = records
            .into_iter()
            .filter(|r| r.date == date)
            .map(|r| (r.student_id, r))
            .collect();

        let entries = students
            .into_iter()
            .map(|student| DailyEntry {
                attendance: by_student.remove(&student.id),
                student,
            })
            .collect();

        Self { date, entries }
    }
}

/// Parses `YYYY-MM-DD`; anything else, including no value, means `today`.
pub fn date_or(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn daily(pool: &SqlitePool, date: NaiveDate) -> Result<DailySheet, AppError> {
    let students = store::students::list_all(pool).await?;
    let records = store::attendance::on_date(pool, date).await?;
    Ok(DailySheet::assemble(date, students, records))
}
