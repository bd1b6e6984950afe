//! Per-type question forms and their `equation` string encodings.
//!
//! Every question type implements [`QuestionForm`]: a total `decode`, an
//! `encode` that is its left inverse for valid forms, and an itemized
//! validator. [`QuestionPayload`] is the tagged union over the five types.
//!
//! The wire encodings join fields with reserved delimiters (`|`, and `,` for
//! number sequences). User text containing a delimiter would corrupt the
//! encoding, so every validator reports such collisions as issues.

pub mod fill_blank;
pub mod math_equation;
pub mod number_sequence;
pub mod select_choice;
pub mod word_problem;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::QuestionKind;

pub use fill_blank::FillInBlank;
pub use math_equation::MathEquation;
pub use number_sequence::NumberSequence;
pub use select_choice::SelectChoice;
pub use word_problem::{SubQuestion, WordProblems};

/// Field separator used by every `|`-joined encoding.
pub const FIELD_DELIMITER: char = '|';

/// One reason a form is not ready to be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The form field the issue is about.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The encode/decode/validate contract shared by all question types.
pub trait QuestionForm:
    Default + Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned
{
    /// The question type this form describes.
    const KIND: QuestionKind;

    /// Unpack an `equation` string. Malformed input yields a default form.
    fn decode(raw: &str) -> Self;

    /// Pack the form into its `equation` string.
    fn encode(&self) -> String;

    /// Every reason the form is not complete; empty when it is.
    fn issues(&self) -> Vec<ValidationIssue>;

    /// Whether the form may be added to an authoring session.
    fn is_complete(&self) -> bool {
        self.issues().is_empty()
    }
}

/// A question's structured payload, one variant per type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionPayload {
    FillInBlank(FillInBlank),
    MathEquation(MathEquation),
    NumberSequence(NumberSequence),
    SelectChoice(SelectChoice),
    WordProblems(WordProblems),
}

macro_rules! dispatch {
    ($payload:expr, $form:ident => $body:expr) => {
        match $payload {
            QuestionPayload::FillInBlank($form) => $body,
            QuestionPayload::MathEquation($form) => $body,
            QuestionPayload::NumberSequence($form) => $body,
            QuestionPayload::SelectChoice($form) => $body,
            QuestionPayload::WordProblems($form) => $body,
        }
    };
}

impl QuestionPayload {
    /// An empty form of the given type.
    pub fn empty(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::FillInBlank => QuestionPayload::FillInBlank(FillInBlank::default()),
            QuestionKind::MathEquation => QuestionPayload::MathEquation(MathEquation::default()),
            QuestionKind::NumberSequence => {
                QuestionPayload::NumberSequence(NumberSequence::default())
            }
            QuestionKind::SelectChoice => QuestionPayload::SelectChoice(SelectChoice::default()),
            QuestionKind::WordProblems => QuestionPayload::WordProblems(WordProblems::default()),
        }
    }

    /// Decode an `equation` string as the given type.
    pub fn decode(kind: QuestionKind, raw: &str) -> Self {
        match kind {
            QuestionKind::FillInBlank => QuestionPayload::FillInBlank(FillInBlank::decode(raw)),
            QuestionKind::MathEquation => {
                QuestionPayload::MathEquation(MathEquation::decode(raw))
            }
            QuestionKind::NumberSequence => {
                QuestionPayload::NumberSequence(NumberSequence::decode(raw))
            }
            QuestionKind::SelectChoice => {
                QuestionPayload::SelectChoice(SelectChoice::decode(raw))
            }
            QuestionKind::WordProblems => {
                QuestionPayload::WordProblems(WordProblems::decode(raw))
            }
        }
    }

    pub fn kind(&self) -> QuestionKind {
        dispatch!(self, form => kind_of(form))
    }

    pub fn encode(&self) -> String {
        dispatch!(self, form => form.encode())
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        dispatch!(self, form => form.issues())
    }

    pub fn is_complete(&self) -> bool {
        dispatch!(self, form => form.is_complete())
    }
}

fn kind_of<F: QuestionForm>(_form: &F) -> QuestionKind {
    F::KIND
}

// ---------------------------------------------------------------------------
// Shared encoding helpers
// ---------------------------------------------------------------------------

/// Split `raw` into exactly `n` `|`-separated fields. The last field keeps
/// any remaining delimiters; missing fields are empty.
pub(crate) fn split_fields(raw: &str, n: usize) -> Vec<&str> {
    let mut fields: Vec<&str> = raw.splitn(n, FIELD_DELIMITER).collect();
    fields.resize(n, "");
    fields
}

/// Parse a JSON string array, falling back to an empty list.
pub(crate) fn decode_string_list(field: &str, name: &str) -> Vec<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!("{name}: not a JSON string array ({e}), using empty list");
            Vec::new()
        }
    }
}

pub(crate) fn encode_string_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Report `value` if it contains the field delimiter.
pub(crate) fn check_delimiter(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    if value.contains(FIELD_DELIMITER) {
        issues.push(ValidationIssue::new(
            field,
            format!("must not contain the reserved character '{FIELD_DELIMITER}'"),
        ));
    }
}

/// Report an optional text field that is set but blank. Blank fields encode
/// the same as absent ones and decode back to `None`.
pub(crate) fn check_optional(
    issues: &mut Vec<ValidationIssue>,
    field: &str,
    value: Option<&str>,
) {
    let Some(value) = value else {
        return;
    };
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "is set but blank; leave it out instead"));
    } else {
        check_delimiter(issues, field, value);
    }
}

/// Report every list entry that contains the field delimiter.
pub(crate) fn check_list_delimiter(issues: &mut Vec<ValidationIssue>, field: &str, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        if value.contains(FIELD_DELIMITER) {
            issues.push(ValidationIssue::new(
                field,
                format!(
                    "entry {} must not contain the reserved character '{FIELD_DELIMITER}'",
                    i + 1
                ),
            ));
        }
    }
}
