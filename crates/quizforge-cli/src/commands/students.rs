//! The `quizforge students` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_client::config::load_config_from;
use quizforge_core::Student;
use quizforge_report::csv::write_students_csv;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read roster: {}", input.display()))?;
    let students: Vec<Student> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse roster: {}", input.display()))?;

    let output = match output {
        Some(dir) => dir,
        None => load_config_from(config_path.as_deref())?.output_dir,
    };

    let today = chrono::Local::now().date_naive();
    let path = write_students_csv(&students, today, &output)?;
    println!(
        "Exported {} student(s) to {}",
        students.len(),
        path.display()
    );
    Ok(())
}
