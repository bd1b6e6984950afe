//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizforge.toml
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizforge.toml with your course API and chat webhook");
    println!("  2. Run: quizforge validate --bank banks/example.toml");
    println!("  3. Run: quizforge stats --bank banks");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

output_dir = "./quizforge-exports"
chart_height = 400

[chat]
webhook_url = "${QUIZFORGE_WEBHOOK_URL}"
user_id = "anonymous"

[api]
base_url = "http://localhost:5000"
token = "${QUIZFORGE_API_TOKEN}"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "One question of each type to get started"

[[questions]]
id = "add-tens"
type = "math_equation"
difficulty = "easy"
explanation = "Add the tens, then the ones."
equation = "23 + 45 = ?|68"

[[questions]]
id = "skip-count"
type = "number_sequence"
difficulty = "easy"
explanation = "Each number is 5 more than the one before."
equation = "5,10,15,20,25"

[[questions]]
id = "sun-rises"
type = "fill_in_blank"
difficulty = "medium"
equation = 'The sun rises in the ___.|["east","west","north"]|["east"]|1|'

[[questions]]
id = "capital"
type = "select_choice"
difficulty = "medium"
equation = 'Which city is the capital of Kenya?|["Mombasa","Nairobi","Kisumu"]|["Nairobi"]|false||'

[[questions]]
id = "bus-trip"
type = "word_problems"
difficulty = "hard"
explanation = "Speed is distance divided by time."
equation = 'A bus travels 120 km in 2 hours.|[{"id":"1","question":"What is its average speed?","answer":"60","unit":"km/h"},{"id":"2","question":"How far does it travel in 5 hours?","answer":"300","unit":"km"}]'
"#;
