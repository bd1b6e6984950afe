//! The `quizforge grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizforge_client::config::load_config_from;
use quizforge_core::grading::{GradeDistribution, LetterGrade, PerformanceRow};
use quizforge_report::csv::write_performance_csv;
use quizforge_report::html::write_html_report;
use quizforge_report::CourseTerm;

use super::ExportTarget;

pub fn execute(
    input: PathBuf,
    export: ExportTarget,
    sheet: CourseTerm,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read performance rows: {}", input.display()))?;
    let rows: Vec<PerformanceRow> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse performance rows: {}", input.display()))?;

    tracing::debug!(rows = rows.len(), "loaded performance rows");

    for row in &rows {
        for field in row.invalid_fields() {
            eprintln!(
                "warning: {} has an out-of-range {} score",
                row.student_id,
                field.label()
            );
        }
    }

    println!("{}", performance_table(&rows));
    print_distribution(&rows);

    let config = load_config_from(config_path.as_deref())?;

    if let Some(dir) = export.resolve(&config) {
        let path = write_performance_csv(&rows, &sheet, &dir)?;
        println!("CSV written to {}", path.display());
    }

    if let Some(path) = html {
        write_html_report(&sheet, &rows, config.chart_height, &path)?;
        println!("HTML gradebook written to {}", path.display());
    }

    Ok(())
}

fn score_cell(value: Option<f64>) -> Cell {
    Cell::new(value.map(|v| v.to_string()).unwrap_or_else(|| "-".into()))
}

pub fn performance_table(rows: &[PerformanceRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Student ID",
        "Name",
        "Assignment 1",
        "Assignment 2",
        "CAT",
        "Exam",
        "Total",
        "Grade",
    ]);

    for row in rows {
        let summary = row.summary();
        table.add_row(vec![
            Cell::new(&row.student_id),
            Cell::new(&row.student_name),
            score_cell(row.assignment1),
            score_cell(row.assignment2),
            score_cell(row.cat),
            score_cell(row.exam),
            Cell::new(
                summary
                    .total
                    .map(|t| format!("{t:.2}"))
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(
                summary
                    .grade
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }
    table
}

pub fn print_distribution(rows: &[PerformanceRow]) {
    let distribution = GradeDistribution::from_rows(rows);
    let parts: Vec<String> = LetterGrade::ALL
        .iter()
        .map(|g| format!("{g}: {}", distribution.count(*g)))
        .collect();
    println!(
        "Grades: {} | ungraded: {}",
        parts.join(", "),
        distribution.ungraded
    );
}
