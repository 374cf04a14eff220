use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::model::{Attendance, AttendanceStatus};
use crate::report::{self, ReportPeriod, daily};
use crate::store::attendance::{self, MarkOutcome, MarkRequest};

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    /// present, absent or late; defaults to present
    #[schema(example = "late")]
    pub status: Option<String>,
    #[schema(example = "bus was late")]
    pub remarks: Option<String>,
    /// Defaults to today
    #[schema(example = "2024-03-04", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct MarkAttendanceResponse {
    #[schema(example = "Attendance marked for Asha Rahman")]
    pub message: String,
    pub outcome: MarkOutcome,
    pub attendance: Attendance,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DateQuery {
    /// YYYY-MM-DD; invalid or missing means today
    #[schema(example = "2024-03-04")]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MonthQuery {
    /// 1-12; invalid or missing means the current month
    #[schema(example = "3")]
    pub month: Option<String>,
    /// Invalid or missing means the current year
    #[schema(example = "2024")]
    pub year: Option<String>,
}

impl MonthQuery {
    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::from_query(self.month.as_deref(), self.year.as_deref(), daily::today())
    }
}

/// Mark (or re-mark) a student's attendance for a day
#[utoipa::path(
    post,
    path = "/api/students/{student_id}/attendance",
    params(
        ("student_id", Path, description = "Student ID")
    ),
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance stored", body = MarkAttendanceResponse),
        (status = 400, description = "Unknown status", body = Object, example = json!({
            "message": "Invalid status 'excused'. Allowed: present, absent, late"
        })),
        (status = 404, description = "Student not found")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<MarkAttendance>,
) -> Result<impl Responder, AppError> {
    let student_id = path.into_inner();
    let payload = payload.into_inner();

    let status = match payload.status.as_deref().map(str::trim) {
        None | Some("") => AttendanceStatus::default(),
        Some(raw) => AttendanceStatus::from_str(raw).map_err(|_| {
            AppError::Validation(format!(
                "Invalid status '{raw}'. Allowed: present, absent, late"
            ))
        })?,
    };

    let marked = attendance::mark(
        pool.get_ref(),
        student_id,
        MarkRequest {
            date: payload.date.unwrap_or_else(daily::today),
            status,
            remarks: payload.remarks,
        },
    )
    .await?;

    let message = match marked.outcome {
        MarkOutcome::Created => format!("Attendance marked for {}", marked.student_name),
        MarkOutcome::Updated => format!("Attendance updated for {}", marked.student_name),
    };

    Ok(HttpResponse::Ok().json(MarkAttendanceResponse {
        message,
        outcome: marked.outcome,
        attendance: marked.record,
    }))
}

/// Every student with their mark for one day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DateQuery),
    responses(
        (status = 200, description = "Attendance sheet", body = crate::report::DailySheet)
    ),
    tag = "Attendance"
)]
pub async fn daily_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<DateQuery>,
) -> Result<impl Responder, AppError> {
    let date = daily::date_or(query.date.as_deref(), daily::today());
    let sheet = daily::daily(pool.get_ref(), date).await?;
    Ok(HttpResponse::Ok().json(sheet))
}

/// One student's month, day by day
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/attendance",
    params(
        ("student_id", Path, description = "Student ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Monthly attendance for the student", body = crate::report::StudentReport),
        (status = 404, description = "Student not found")
    ),
    tag = "Attendance"
)]
pub async fn student_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<MonthQuery>,
) -> Result<impl Responder, AppError> {
    let report =
        report::monthly::student_month(pool.get_ref(), path.into_inner(), query.period()).await?;
    Ok(HttpResponse::Ok().json(report))
}
