//! CSV exports.
//!
//! Every field is double-quoted with embedded quotes doubled, so commas,
//! quotes and line breaks in names or remarks survive a spreadsheet import.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use quizforge_core::grading::PerformanceRow;
use quizforge_core::Student;

use crate::CourseTerm;

pub const PERFORMANCE_HEADER: [&str; 9] = [
    "Student ID",
    "Student Name",
    "Assignment 1",
    "Assignment 2",
    "CAT",
    "Exam",
    "Total",
    "Grade",
    "Remarks",
];

pub const STUDENTS_HEADER: [&str; 6] = [
    "Student ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Enrolled",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn push_record<S: AsRef<str>>(out: &mut String, fields: impl IntoIterator<Item = S>) {
    let line: Vec<String> = fields.into_iter().map(|f| quote(f.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn score(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The performance sheet: one row per student with total and grade.
pub fn performance_csv(rows: &[PerformanceRow]) -> String {
    let mut out = String::new();
    push_record(&mut out, PERFORMANCE_HEADER);
    for row in rows {
        let summary = row.summary();
        push_record(
            &mut out,
            [
                row.student_id.clone(),
                row.student_name.clone(),
                score(row.assignment1),
                score(row.assignment2),
                score(row.cat),
                score(row.exam),
                summary.total.map(|t| format!("{t:.2}")).unwrap_or_default(),
                summary.grade.map(|g| g.to_string()).unwrap_or_default(),
                row.remarks.clone(),
            ],
        );
    }
    out
}

/// The student roster.
pub fn students_csv(students: &[Student]) -> String {
    let mut out = String::new();
    push_record(&mut out, STUDENTS_HEADER);
    for s in students {
        push_record(
            &mut out,
            [
                s.student_id.as_str(),
                s.first_name.as_str(),
                s.last_name.as_str(),
                s.email.as_str(),
                s.phone.as_deref().unwrap_or_default(),
                s.enrolled_at.as_deref().unwrap_or_default(),
            ],
        );
    }
    out
}

/// Replace characters that are unsafe in file names with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn performance_filename(sheet: &CourseTerm) -> String {
    sanitize_filename(&format!(
        "{}_{}_{}_performance.csv",
        sheet.course_title, sheet.term, sheet.academic_year
    ))
}

pub fn students_filename(date: NaiveDate) -> String {
    format!("students_{}.csv", date.format("%Y-%m-%d"))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write the performance sheet into `dir` and return the file path.
pub fn write_performance_csv(
    rows: &[PerformanceRow],
    sheet: &CourseTerm,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(performance_filename(sheet));
    write_file(&path, &performance_csv(rows))?;
    Ok(path)
}

/// Write the roster into `dir`, named after `date`, and return the file path.
pub fn write_students_csv(students: &[Student], date: NaiveDate, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(students_filename(date));
    write_file(&path, &students_csv(students))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::grading::ScoreField;

    fn rows() -> Vec<PerformanceRow> {
        let mut amina = PerformanceRow::new("S1", "Amina \"Mimi\" Njeri");
        amina.set_score(ScoreField::Assignment1, Some(89.0));
        amina.set_score(ScoreField::Assignment2, Some(91.0));
        amina.remarks = "Excellent, keep it up".into();

        let brian = PerformanceRow::new("S2", "Brian Otieno");
        vec![amina, brian]
    }

    #[test]
    fn performance_header_and_rows() {
        let csv = performance_csv(&rows());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3, "header plus one line per student");
        assert_eq!(
            lines[0],
            r#""Student ID","Student Name","Assignment 1","Assignment 2","CAT","Exam","Total","Grade","Remarks""#
        );
        assert_eq!(
            lines[1],
            r#""S1","Amina ""Mimi"" Njeri","89","91","","","90.00","A","Excellent, keep it up""#
        );
        assert_eq!(lines[2], r#""S2","Brian Otieno","","","","","","","""#);
    }

    #[test]
    fn students_export() {
        let students = vec![Student {
            student_id: "S7".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            enrolled_at: Some("2024-09-02".into()),
        }];
        let csv = students_csv(&students);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"Student ID\",\"First Name\""));
        assert_eq!(
            lines[1],
            r#""S7","Ada","Lovelace","ada@example.com","","2024-09-02""#
        );
    }

    #[test]
    fn line_breaks_stay_inside_quotes() {
        let mut row = PerformanceRow::new("S3", "Chen");
        row.remarks = "Line one\nLine two".into();
        let csv = performance_csv(&[row]);
        assert!(csv.contains("\"Line one\nLine two\""));
    }

    #[test]
    fn filenames() {
        let sheet = CourseTerm::new("Math 101: Algebra", "Term 1", "2024/2025");
        assert_eq!(
            performance_filename(&sheet),
            "Math_101__Algebra_Term_1_2024_2025_performance.csv"
        );
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(students_filename(date), "students_2025-03-07.csv");
    }

    #[test]
    fn write_to_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports").join("term1");
        let sheet = CourseTerm::new("Science", "Term 2", "2025");

        let path = write_performance_csv(&rows(), &sheet, &out).unwrap();
        assert!(path.ends_with("Science_Term_2_2025_performance.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let path = write_students_csv(&[], date, &out).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap().lines().count(), 1);
    }
}
