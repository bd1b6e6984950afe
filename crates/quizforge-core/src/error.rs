//! Core error types.
//!
//! Decoding the `equation` field never fails; these errors cover the
//! strict entry points (type and difficulty names, session edits).

use thiserror::Error;

use crate::questions::ValidationIssue;

/// Errors raised by the question model and the authoring session.
#[derive(Debug, Error)]
pub enum QuestionError {
    /// The question type name is not one of the five known kinds.
    #[error("unknown question type: {0}")]
    UnknownKind(String),

    /// The difficulty name is not easy, medium, or hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// The question is not ready to be added.
    #[error("question is incomplete: {}", format_issues(.issues))]
    Incomplete { issues: Vec<ValidationIssue> },

    /// A session index does not point at an existing question.
    #[error("no question at index {index} (session holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl QuestionError {
    /// The itemized reasons, if this is an `Incomplete` error.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            QuestionError::Incomplete { issues } => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Invalid transitions of the audio recorder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecorderError {
    #[error("recorder is already recording")]
    AlreadyRecording,

    #[error("recorder is not recording")]
    NotRecording,
}
