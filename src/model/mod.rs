pub mod attendance;
pub mod student;

pub use attendance::{Attendance, AttendanceStatus};
pub use student::Student;
