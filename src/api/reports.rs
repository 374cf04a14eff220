use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;
use tracing::info;

use super::attendance::MonthQuery;
use super::xlsx_attachment;
use crate::error::AppError;
use crate::export::{self, ColumnWidths, REPORT_COLUMN_WIDTH};
use crate::report::monthly;

/// Monthly attendance for every student
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    params(MonthQuery),
    responses(
        (status = 200, description = "Per-day attendance and statistics", body = crate::report::MonthlyReport),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn monthly_report(
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> Result<impl Responder, AppError> {
    let report = monthly::monthly(pool.get_ref(), query.period()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Download the monthly attendance report as xlsx
#[utoipa::path(
    get,
    path = "/api/reports/monthly/export",
    params(MonthQuery),
    responses(
        (status = 200, description = "Spreadsheet attachment (attendance_report_<Month>_<Year>.xlsx)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn export_monthly_report(
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> Result<impl Responder, AppError> {
    let period = query.period();
    let report = monthly::monthly(pool.get_ref(), period).await?;

    let dataset = export::monthly_report(&report);
    let bytes = export::to_xlsx(&dataset, ColumnWidths::Fixed(REPORT_COLUMN_WIDTH))?;
    let filename = export::monthly_report_filename(&period);

    info!(
        year = period.year,
        month = period.month,
        rows = report.students.len(),
        %filename,
        "Exported monthly report"
    );
    Ok(xlsx_attachment(bytes, filename))
}
