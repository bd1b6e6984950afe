//! quizforge-core — Question model, codecs, validators, and grading.
//!
//! This crate defines the authored-question data model, the per-type
//! encodings of the flat `equation` field, and the derived-value
//! computations (difficulty stats, grades, chart parameters) that the rest
//! of quizforge builds on.

pub mod chart;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod questions;
pub mod recorder;
pub mod session;
pub mod statistics;

pub use error::{QuestionError, RecorderError};
pub use model::{AuthoredQuestion, Difficulty, QuestionKind, Student, WireQuestion};
pub use questions::{QuestionForm, QuestionPayload, ValidationIssue};
