//! Word problems: a scenario text followed by linked sub-questions.
//!
//! Encoding: `problem_text|JSON(sub_questions)`.

use serde::{Deserialize, Serialize};

use super::{check_delimiter, QuestionForm, ValidationIssue, FIELD_DELIMITER};
use crate::model::QuestionKind;

/// One linked question inside a word problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub unit: String,
}

// Ids are generated as timestamps by some authoring clients, so accept
// either a JSON string or an integer.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer sub-question id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProblems {
    pub problem_text: String,
    pub sub_questions: Vec<SubQuestion>,
}

impl WordProblems {
    /// Append an empty sub-question with a fresh id and return the id.
    pub fn add_sub_question(&mut self) -> String {
        let next = self
            .sub_questions
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .map_or(self.sub_questions.len() as u64 + 1, |max| max + 1);
        let id = next.to_string();
        self.sub_questions.push(SubQuestion {
            id: id.clone(),
            ..SubQuestion::default()
        });
        id
    }

    /// Remove the sub-question with `id`; returns whether one was removed.
    pub fn remove_sub_question(&mut self, id: &str) -> bool {
        let before = self.sub_questions.len();
        self.sub_questions.retain(|s| s.id != id);
        self.sub_questions.len() != before
    }

    pub fn sub_question_mut(&mut self, id: &str) -> Option<&mut SubQuestion> {
        self.sub_questions.iter_mut().find(|s| s.id == id)
    }
}

impl QuestionForm for WordProblems {
    const KIND: QuestionKind = QuestionKind::WordProblems;

    fn decode(raw: &str) -> Self {
        let Some((problem_text, json)) = raw.split_once(FIELD_DELIMITER) else {
            return Self {
                problem_text: raw.to_string(),
                sub_questions: Vec::new(),
            };
        };
        let sub_questions = if json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Vec<SubQuestion>>(json).unwrap_or_else(|e| {
                tracing::debug!("word_problems: bad sub-question JSON ({e}), using empty list");
                Vec::new()
            })
        };
        Self {
            problem_text: problem_text.to_string(),
            sub_questions,
        }
    }

    fn encode(&self) -> String {
        let json = serde_json::to_string(&self.sub_questions).unwrap_or_else(|_| "[]".to_string());
        format!("{}{FIELD_DELIMITER}{json}", self.problem_text)
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.problem_text.trim().is_empty() {
            issues.push(ValidationIssue::new("problem_text", "problem text is required"));
        }
        check_delimiter(&mut issues, "problem_text", &self.problem_text);

        if self.sub_questions.is_empty() {
            issues.push(ValidationIssue::new(
                "sub_questions",
                "at least one sub-question is required",
            ));
        }
        for (i, sub) in self.sub_questions.iter().enumerate() {
            if sub.question.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    "sub_questions",
                    format!("sub-question {} has no question", i + 1),
                ));
            }
            if sub.answer.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    "sub_questions",
                    format!("sub-question {} has no answer", i + 1),
                ));
            }
            if self.sub_questions[..i].iter().any(|s| s.id == sub.id) {
                issues.push(ValidationIssue::new(
                    "sub_questions",
                    format!("sub-question {} reuses id {}", i + 1, sub.id),
                ));
            }
        }
        issues
    }
}
