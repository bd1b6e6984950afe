//! The `quizforge performance` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_client::config::load_config_from;
use quizforge_client::CourseApi;
use quizforge_report::csv::write_performance_csv;
use quizforge_report::CourseTerm;

use super::grade::{performance_table, print_distribution};
use super::ExportTarget;

pub async fn execute(
    course: String,
    term: String,
    year: String,
    export: ExportTarget,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let api = CourseApi::from_config(&config.api)?;

    let rows = api
        .fetch_performance(&course, &term, &year)
        .await
        .with_context(|| format!("failed to fetch performance for course {course}"))?;

    if rows.is_empty() {
        println!("No performance records for {course} ({term}, {year}).");
        return Ok(());
    }

    println!("{}", performance_table(&rows));
    print_distribution(&rows);

    if let Some(dir) = export.resolve(&config) {
        let sheet = CourseTerm::new(course, term, year);
        let path = write_performance_csv(&rows, &sheet, &dir)?;
        println!("CSV written to {}", path.display());
    }

    Ok(())
}
