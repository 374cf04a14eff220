use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

/// One row per (student, date); the pair is unique in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = 1)]
    pub student_id: i64,
    #[schema(example = "2024-03-04", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = "bus was late", nullable = true)]
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(AttendanceStatus::from_str("LATE").unwrap(), AttendanceStatus::Late);
        assert_eq!(AttendanceStatus::from_str("Absent").unwrap(), AttendanceStatus::Absent);
        assert!(AttendanceStatus::from_str("excused").is_err());
    }

    #[test]
    fn status_text_is_lowercase() {
        let names: Vec<String> = AttendanceStatus::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["present", "absent", "late"]);
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Present);
    }
}
