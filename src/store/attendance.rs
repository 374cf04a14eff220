use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::{Attendance, AttendanceStatus};

const ATTENDANCE_COLUMNS: &str = "id, student_id, date, status, remarks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct MarkRequest {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Marked {
    pub student_name: String,
    pub record: Attendance,
    pub outcome: MarkOutcome,
}

/// Records the student's status for `request.date`, replacing any earlier mark for that day.
pub async fn mark(pool: &SqlitePool, student_id: i64, request: MarkRequest) -> Result<Marked, AppError> {
    let remarks = request
        .remarks
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let mut tx = pool.begin().await?;

    // The first statement must write: a read would take a SHARED lock that SQLite
    // refuses to upgrade while another mark is in flight.
    let updated = sqlx::query_as::<_, Attendance>(&format!(
        r#"
        UPDATE attendance SET status = ?, remarks = ?
        WHERE student_id = ? AND date = ?
        RETURNING {ATTENDANCE_COLUMNS}
        "#
    ))
    .bind(request.status)
    .bind(&remarks)
    .bind(student_id)
    .bind(request.date)
    .fetch_optional(&mut *tx)
    .await?;

    let student_name = sqlx::query_scalar::<_, String>("SELECT name FROM students WHERE id = ?")
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::student_not_found(student_id))?;

    let (record, outcome) = match updated {
        Some(record) => (record, MarkOutcome::Updated),
        None => {
            let record = sqlx::query_as::<_, Attendance>(&format!(
                r#"
                INSERT INTO attendance (student_id, date, status, remarks)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (student_id, date)
                DO UPDATE SET status = excluded.status, remarks = excluded.remarks
                RETURNING {ATTENDANCE_COLUMNS}
                "#
            ))
            .bind(student_id)
            .bind(request.date)
            .bind(request.status)
            .bind(remarks)
            .fetch_one(&mut *tx)
            .await?;
            (record, MarkOutcome::Created)
        }
    };

    tx.commit().await?;

    info!(
        student_id,
        date = %record.date,
        status = %record.status,
        ?outcome,
        "Attendance marked"
    );

    Ok(Marked {
        student_name,
        record,
        outcome,
    })
}

/// Records with `first <= date <= last`, optionally for one student, ordered by student then date.
pub async fn between(
    pool: &SqlitePool,
    first: NaiveDate,
    last: NaiveDate,
    student_id: Option<i64>,
) -> Result<Vec<Attendance>, AppError> {
    let records = match student_id {
        Some(student_id) => {
            sqlx::query_as::<_, Attendance>(&format!(
                "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE student_id = ? AND date BETWEEN ? AND ? ORDER BY date"
            ))
            .bind(student_id)
            .bind(first)
            .bind(last)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Attendance>(&format!(
                "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE date BETWEEN ? AND ? ORDER BY student_id, date"
            ))
            .bind(first)
            .bind(last)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(records)
}

pub async fn on_date(pool: &SqlitePool, date: NaiveDate) -> Result<Vec<Attendance>, AppError> {
    let records = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE date = ? ORDER BY student_id"
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(records)
}
