//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.
//! Each question is stored in its wire form (`type` plus `equation`) and
//! decoded into a structured payload on load.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{AuthoredQuestion, Difficulty, QuestionKind, WireQuestion};
use crate::statistics::DifficultyStats;

/// A named collection of authored questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<AuthoredQuestion>,
}

impl QuestionBank {
    pub fn stats(&self) -> DifficultyStats {
        DifficultyStats::from_questions(&self.questions)
    }

    /// The flat records to submit to the backend.
    pub fn to_wire(&self) -> Vec<WireQuestion> {
        self.questions.iter().map(AuthoredQuestion::to_wire).collect()
    }
}

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    equation: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank`.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let label = q.id.clone().unwrap_or_else(|| format!("#{}", i + 1));
            let kind: QuestionKind = q
                .question_type
                .parse()
                .with_context(|| format!("question {label}"))?;
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .with_context(|| format!("question {label}"))?;

            let wire = WireQuestion {
                question_type: kind,
                equation: q.equation,
                explanation: q.explanation,
                difficulty,
            };
            let mut question = AuthoredQuestion::from_wire(&wire);
            question.id = q.id;
            Ok(question)
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid question in {}", source_path.display()))?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankWarning {
    /// The question id, or `#n` (1-based) when the question has none.
    pub question: String,
    pub message: String,
}

/// Validate a bank: duplicate ids and every incomplete question.
pub fn validate_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if let Some(id) = &q.id {
            if !seen_ids.insert(id) {
                warnings.push(BankWarning {
                    question: id.clone(),
                    message: format!("duplicate question ID: {id}"),
                });
            }
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        let label = q.id.clone().unwrap_or_else(|| format!("#{}", i + 1));
        for issue in q.question.issues() {
            warnings.push(BankWarning {
                question: label.clone(),
                message: format!("{} ({issue})", q.kind()),
            });
        }
    }

    warnings
}
