//! Read-only aggregation over the directory and the ledger.

pub mod daily;
pub mod monthly;
pub mod period;

pub use daily::{DailyEntry, DailySheet};
pub use monthly::{AttendanceStats, DayEntry, MonthlyReport, StudentReport, attendance_rate};
pub use period::ReportPeriod;
