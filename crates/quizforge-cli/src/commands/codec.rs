//! The `quizforge decode` and `quizforge encode` commands.

use anyhow::{Context, Result};

use quizforge_core::{QuestionKind, QuestionPayload};

pub fn decode(kind: String, equation: String) -> Result<()> {
    let kind: QuestionKind = kind.parse()?;
    let payload = QuestionPayload::decode(kind, &equation);

    println!("{}", serde_json::to_string_pretty(&payload)?);

    let issues = payload.issues();
    if issues.is_empty() {
        println!("Complete: yes");
    } else {
        println!("Complete: no");
        for issue in &issues {
            println!("  - {issue}");
        }
    }
    Ok(())
}

pub fn encode(kind: String, json: String) -> Result<()> {
    let kind: QuestionKind = kind.parse()?;

    let mut value: serde_json::Value =
        serde_json::from_str(&json).context("--json is not valid JSON")?;
    let object = value
        .as_object_mut()
        .context("--json must be a JSON object")?;
    object
        .entry("type")
        .or_insert_with(|| serde_json::Value::String(kind.as_str().to_string()));

    let payload: QuestionPayload = serde_json::from_value(value)
        .with_context(|| format!("--json does not describe a {kind} question"))?;
    anyhow::ensure!(
        payload.kind() == kind,
        "--json has type {} but --type is {kind}",
        payload.kind()
    );

    for issue in payload.issues() {
        eprintln!("warning: {issue}");
    }
    println!("{}", payload.encode());
    Ok(())
}
