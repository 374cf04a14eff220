use crate::api::attendance::{DateQuery, MarkAttendance, MarkAttendanceResponse, MonthQuery};
use crate::api::students::{StudentPayload, StudentSearch};
use crate::model::{Attendance, AttendanceStatus, Student};
use crate::report::{
    AttendanceStats, DailyEntry, DailySheet, DayEntry, MonthlyReport, ReportPeriod, StudentReport,
};
use crate::store::attendance::MarkOutcome;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Student Attendance Tracker

Register students, mark daily attendance and review it month by month.

### Features
- **Students**
  - Create, update, delete, list and search by name or roll number
  - Export the list (or a search result) to `.xlsx`
- **Attendance**
  - Mark a student present, absent or late for a day; marking again replaces the earlier mark
  - View every student's mark for a single day
- **Reports**
  - Monthly per-day view with present/absent/late counts and attendance rate
  - Export the monthly report to `.xlsx`

### Query parameters
Malformed `month`, `year` or `date` values are not rejected: they fall back to the current month, year or day.

---
Built with **Rust**, **Actix Web**, **SQLx**, **rust_xlsxwriter** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::students::list_students,
        crate::api::students::create_student,
        crate::api::students::get_student,
        crate::api::students::update_student,
        crate::api::students::delete_student,
        crate::api::students::export_students,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::daily_attendance,
        crate::api::attendance::student_attendance,

        crate::api::reports::monthly_report,
        crate::api::reports::export_monthly_report
    ),
    components(
        schemas(
            Student,
            StudentPayload,
            StudentSearch,
            Attendance,
            AttendanceStatus,
            MarkAttendance,
            MarkAttendanceResponse,
            MarkOutcome,
            DateQuery,
            MonthQuery,
            DailySheet,
            DailyEntry,
            ReportPeriod,
            AttendanceStats,
            DayEntry,
            StudentReport,
            MonthlyReport
        )
    ),
    tags(
        (name = "Student", description = "Student directory APIs"),
        (name = "Attendance", description = "Attendance marking APIs"),
        (name = "Report", description = "Monthly report and export APIs"),
    )
)]
pub struct ApiDoc;
