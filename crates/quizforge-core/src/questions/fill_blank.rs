//! Fill-in-the-blank questions.
//!
//! Encoding: `question|JSON(options)|JSON(correct_answers)|blanks_count|audio_url`,
//! with an empty last field when there is no audio clip.

use serde::{Deserialize, Serialize};

use super::{
    check_delimiter, check_list_delimiter, check_optional, decode_string_list,
    encode_string_list, non_empty, split_fields, QuestionForm, ValidationIssue,
};
use crate::model::QuestionKind;

/// The placeholder marking one blank in the question text.
pub const BLANK_PLACEHOLDER: &str = "___";

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;
pub const MAX_BLANKS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInBlank {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub blanks_count: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Default for FillInBlank {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: Vec::new(),
            correct_answers: Vec::new(),
            blanks_count: 1,
            audio_url: None,
        }
    }
}

impl FillInBlank {
    /// Number of `___` placeholders in the question text.
    pub fn placeholder_count(&self) -> usize {
        self.question.matches(BLANK_PLACEHOLDER).count()
    }

    /// Set the blank count (clamped to 1..=2) and drop surplus answers.
    pub fn set_blanks_count(&mut self, count: u8) {
        self.blanks_count = count.clamp(1, MAX_BLANKS);
        self.correct_answers.truncate(self.blanks_count as usize);
    }

    /// Append an option; refused once [`MAX_OPTIONS`] is reached.
    pub fn add_option(&mut self, option: impl Into<String>) -> bool {
        if self.options.len() >= MAX_OPTIONS {
            return false;
        }
        self.options.push(option.into());
        true
    }

    /// Remove an option (and its correct-answer mark); refused below
    /// [`MIN_OPTIONS`].
    pub fn remove_option(&mut self, index: usize) -> bool {
        if index >= self.options.len() || self.options.len() <= MIN_OPTIONS {
            return false;
        }
        let removed = self.options.remove(index);
        self.correct_answers.retain(|a| *a != removed);
        true
    }
}

impl QuestionForm for FillInBlank {
    const KIND: QuestionKind = QuestionKind::FillInBlank;

    fn decode(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let fields = split_fields(raw, 5);
        let question = fields[0].to_string();
        let blanks_count = match fields[3].trim().parse::<u8>() {
            Ok(n) if (1..=MAX_BLANKS).contains(&n) => n,
            _ => {
                let inferred = question
                    .matches(BLANK_PLACEHOLDER)
                    .count()
                    .clamp(1, MAX_BLANKS as usize) as u8;
                tracing::debug!(
                    "fill_in_blank: invalid blanks count {:?}, inferred {inferred}",
                    fields[3]
                );
                inferred
            }
        };
        Self {
            question,
            options: decode_string_list(fields[1], "fill_in_blank.options"),
            correct_answers: decode_string_list(fields[2], "fill_in_blank.correct_answers"),
            blanks_count,
            audio_url: non_empty(fields[4]),
        }
    }

    fn encode(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.question,
            encode_string_list(&self.options),
            encode_string_list(&self.correct_answers),
            self.blanks_count,
            self.audio_url.as_deref().unwrap_or_default()
        )
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.question.trim().is_empty() {
            issues.push(ValidationIssue::new("question", "question text is required"));
        }
        if !(1..=MAX_BLANKS).contains(&self.blanks_count) {
            issues.push(ValidationIssue::new(
                "blanks_count",
                format!("must be 1 or {MAX_BLANKS}"),
            ));
        }
        let placeholders = self.placeholder_count();
        if placeholders != self.blanks_count as usize {
            issues.push(ValidationIssue::new(
                "question",
                format!(
                    "contains {placeholders} blank(s) ({BLANK_PLACEHOLDER}) but blanks count is {}",
                    self.blanks_count
                ),
            ));
        }

        if self.options.len() < MIN_OPTIONS || self.options.len() > MAX_OPTIONS {
            issues.push(ValidationIssue::new(
                "options",
                format!(
                    "between {MIN_OPTIONS} and {MAX_OPTIONS} options are required (got {})",
                    self.options.len()
                ),
            ));
        }
        for (i, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                issues.push(ValidationIssue::new("options", format!("option {} is empty", i + 1)));
            } else if self.options[..i].contains(option) {
                issues.push(ValidationIssue::new(
                    "options",
                    format!("option {} duplicates \"{option}\"", i + 1),
                ));
            }
        }

        if self.correct_answers.len() != self.blanks_count as usize {
            issues.push(ValidationIssue::new(
                "correct_answers",
                format!(
                    "{} correct answer(s) required, one per blank (got {})",
                    self.blanks_count,
                    self.correct_answers.len()
                ),
            ));
        }
        for answer in &self.correct_answers {
            if !self.options.contains(answer) {
                issues.push(ValidationIssue::new(
                    "correct_answers",
                    format!("\"{answer}\" is not one of the options"),
                ));
            }
        }

        check_delimiter(&mut issues, "question", &self.question);
        check_list_delimiter(&mut issues, "options", &self.options);
        check_optional(&mut issues, "audio_url", self.audio_url.as_deref());
        issues
    }
}
