//! The `quizforge stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::parser::load_banks;
use quizforge_core::statistics::{count_by_kind, DifficultyStats};
use quizforge_core::{AuthoredQuestion, QuestionKind};

pub fn execute(bank_path: PathBuf, format: String) -> Result<()> {
    let banks = load_banks(&bank_path)?;
    tracing::debug!(count = banks.len(), "loaded question banks");
    let all: Vec<AuthoredQuestion> = banks
        .iter()
        .flat_map(|b| b.questions.iter().cloned())
        .collect();

    match format.as_str() {
        "json" => {
            let overall = DifficultyStats::from_questions(&all);
            let mut per_bank = serde_json::Map::new();
            for bank in &banks {
                per_bank.insert(bank.id.clone(), serde_json::to_value(bank.stats())?);
            }
            let json = serde_json::json!({
                "overall": overall,
                "banks": per_bank,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "table" => {
            let mut table = Table::new();
            table.set_header(vec!["Bank", "Easy", "Medium", "Hard", "Total"]);
            for bank in &banks {
                let stats = bank.stats();
                table.add_row(vec![
                    Cell::new(&bank.name),
                    Cell::new(stats.easy),
                    Cell::new(stats.medium),
                    Cell::new(stats.hard),
                    Cell::new(stats.total),
                ]);
            }
            if banks.len() > 1 {
                let stats = DifficultyStats::from_questions(&all);
                table.add_row(vec![
                    Cell::new("All banks"),
                    Cell::new(stats.easy),
                    Cell::new(stats.medium),
                    Cell::new(stats.hard),
                    Cell::new(stats.total),
                ]);
            }
            println!("{table}");

            let counts = count_by_kind(&all);
            let mut kinds = Table::new();
            kinds.set_header(vec!["Type", "Questions"]);
            for kind in QuestionKind::ALL {
                kinds.add_row(vec![
                    Cell::new(kind),
                    Cell::new(counts.get(&kind).copied().unwrap_or(0)),
                ]);
            }
            println!("{kinds}");
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}
