use super::{Cell, Dataset, Row};
use crate::model::Student;
use crate::report::{MonthlyReport, ReportPeriod};

pub const STUDENT_LIST_TITLE: &str = "Student List";
const NO_RECORD: &str = "N/A";

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn identity(student: &Student) -> Row {
    vec![
        ("ID".to_string(), Cell::from(student.id)),
        ("Name".to_string(), Cell::from(student.name.as_str())),
        ("Roll Number".to_string(), Cell::from(student.roll_number.as_str())),
    ]
}

pub fn student_list(students: &[Student]) -> Dataset {
    let mut dataset = Dataset::new(
        STUDENT_LIST_TITLE,
        columns(&["ID", "Name", "Roll Number", "Registration Date"]),
    );

    for student in students {
        let mut row = identity(student);
        row.push((
            "Registration Date".to_string(),
            Cell::from(student.registration_date.format("%Y-%m-%d %H:%M:%S").to_string()),
        ));
        dataset.push_row(row);
    }

    dataset
}

/// One row per student: identity, `Day_1..Day_N` status text, then the totals.
pub fn monthly_report(report: &MonthlyReport) -> Dataset {
    let day_columns: Vec<String> = report.day_numbers().map(|d| format!("Day_{d}")).collect();

    let mut header = columns(&["ID", "Name", "Roll Number"]);
    header.extend(day_columns.iter().cloned());
    header.extend(columns(&["Present", "Absent", "Late", "Attendance_Rate"]));

    let mut dataset = Dataset::new(report.period.title(), header);

    for entry in &report.students {
        let mut row = identity(&entry.student);

        for (column, day) in day_columns.iter().zip(&entry.days) {
            let status = day
                .record
                .as_ref()
                .map_or_else(|| NO_RECORD.to_string(), |record| record.status.to_string());
            row.push((column.clone(), Cell::from(status)));
        }

        let stats = &entry.stats;
        row.push(("Present".to_string(), Cell::from(stats.present)));
        row.push(("Absent".to_string(), Cell::from(stats.absent)));
        row.push(("Late".to_string(), Cell::from(stats.late)));
        row.push((
            "Attendance_Rate".to_string(),
            Cell::from(format!("{:.1}%", stats.attendance_rate)),
        ));

        dataset.push_row(row);
    }

    dataset
}

/// `student_list.xlsx`, or `student_list_search_<query>.xlsx` for a filtered export.
///
/// Control characters are dropped from the query and path separators become `_`.
pub fn student_list_filename(query: Option<&str>) -> String {
    let query: String = query
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match query.trim() {
        "" => "student_list.xlsx".to_string(),
        query => format!("student_list_search_{query}.xlsx"),
    }
}

pub fn monthly_report_filename(period: &ReportPeriod) -> String {
    format!(
        "attendance_report_{}_{}.xlsx",
        period.month_name(),
        period.year
    )
}
