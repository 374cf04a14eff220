//! In-memory xlsx rendering of tabular datasets.

pub mod datasets;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub use datasets::{monthly_report, monthly_report_filename, student_list, student_list_filename};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Width applied to every column of the monthly report.
pub const REPORT_COLUMN_WIDTH: f64 = 15.0;

const SHEET_NAME_MAX_CHARS: usize = 31;
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    /// Character count of the value as it would be printed.
    fn display_len(&self) -> usize {
        match self {
            Cell::Int(n) => n.to_string().len(),
            Cell::Text(s) => s.chars().count(),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Int(i64::from(n))
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A row is an ordered list of (column key, value) pairs.
pub type Row = Vec<(String, Cell)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn cell<'a>(row: &'a Row, column: &str) -> Option<&'a Cell> {
        row.iter().find(|(key, _)| key == column).map(|(_, cell)| cell)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidths {
    /// Longest value or header, plus 2
    FitContent,
    Fixed(f64),
}

impl ColumnWidths {
    pub fn resolve(&self, dataset: &Dataset) -> Vec<f64> {
        match *self {
            ColumnWidths::Fixed(width) => vec![width; dataset.columns.len()],
            ColumnWidths::FitContent => dataset
                .columns
                .iter()
                .map(|column| {
                    let longest = dataset
                        .rows
                        .iter()
                        .filter_map(|row| Dataset::cell(row, column))
                        .map(Cell::display_len)
                        .max()
                        .unwrap_or(0);
                    (longest.max(column.chars().count()) + 2) as f64
                })
                .collect(),
        }
    }
}

/// Makes `title` acceptable as a worksheet name: forbidden characters become `_`,
/// surrounding apostrophes are dropped and the result is cut to 31 characters.
pub fn sanitize_sheet_name(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let trimmed: String = replaced
        .trim_matches('\'')
        .chars()
        .take(SHEET_NAME_MAX_CHARS)
        .collect();
    let trimmed = trimmed.trim_end_matches('\'');

    if trimmed.is_empty() {
        "Sheet1".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders the dataset as a single-sheet workbook: header row first, then one row per
/// dataset row. Missing keys leave the cell blank.
pub fn to_xlsx(dataset: &Dataset, widths: ColumnWidths) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(&dataset.title))?;

    let header_format = Format::new().set_bold();

    for (col, header) in dataset.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    for (idx, row) in dataset.rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, column) in dataset.columns.iter().enumerate() {
            match Dataset::cell(row, column) {
                Some(Cell::Int(n)) => {
                    worksheet.write_number(row_num, col as u16, *n as f64)?;
                }
                Some(Cell::Text(s)) => {
                    worksheet.write_string(row_num, col as u16, s.as_str())?;
                }
                None => {}
            }
        }
    }

    for (col, width) in widths.resolve(dataset).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// Sheet XML plus shared strings, concatenated, for content assertions.
    pub(crate) fn sheet_xml(bytes: &[u8]) -> (String, String) {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("xlsx is a zip archive");
        let mut read = |name: &str| {
            let mut out = String::new();
            if let Ok(mut file) = archive.by_name(name) {
                file.read_to_string(&mut out).expect("utf-8 part");
            }
            out
        };
        let sheet = read("xl/worksheets/sheet1.xml");
        let strings = read("xl/sharedStrings.xml");
        let workbook = read("xl/workbook.xml");
        (format!("{sheet}{strings}"), workbook)
    }

    fn sample() -> Dataset {
        let mut dataset = Dataset::new("People", vec!["ID".into(), "Name".into()]);
        dataset.push_row(vec![("ID".into(), 1i64.into()), ("Name".into(), "Åsa Lindqvist".into())]);
        dataset.push_row(vec![("ID".into(), 12345i64.into())]);
        dataset
    }

    #[test]
    fn fit_widths_use_longest_value_or_header() {
        let widths = ColumnWidths::FitContent.resolve(&sample());
        // "12345" vs "ID"; "Åsa Lindqvist" counts characters, not bytes
        assert_eq!(widths, vec![7.0, 15.0]);
    }

    #[test]
    fn fit_widths_of_empty_dataset_use_headers() {
        let dataset = Dataset::new("Empty", vec!["Roll Number".into()]);
        assert_eq!(ColumnWidths::FitContent.resolve(&dataset), vec![13.0]);
    }

    #[test]
    fn fixed_widths_cover_every_column() {
        assert_eq!(ColumnWidths::Fixed(15.0).resolve(&sample()), vec![15.0, 15.0]);
    }

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sanitize_sheet_name("March 2024"), "March 2024");
        assert_eq!(sanitize_sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);
    }

    #[test]
    fn header_only_workbook_for_empty_dataset() {
        let dataset = Dataset::new("Empty", vec!["ID".into(), "Name".into()]);
        let bytes = to_xlsx(&dataset, ColumnWidths::FitContent).unwrap();
        let (sheet, workbook) = sheet_xml(&bytes);
        assert_eq!(sheet.matches("<row ").count(), 1);
        assert!(sheet.contains("Name"));
        assert!(workbook.contains(r#"name="Empty""#));
    }

    #[test]
    fn writes_one_row_per_record() {
        let bytes = to_xlsx(&sample(), ColumnWidths::FitContent).unwrap();
        let (sheet, _) = sheet_xml(&bytes);
        assert_eq!(sheet.matches("<row ").count(), 3);
        assert!(sheet.contains("Åsa Lindqvist"));
    }
}
