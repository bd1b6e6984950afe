//! Math equation questions: `equation|answer`.

use serde::{Deserialize, Serialize};

use super::{check_delimiter, QuestionForm, ValidationIssue, FIELD_DELIMITER};
use crate::model::QuestionKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathEquation {
    pub equation: String,
    pub answer: String,
}

impl QuestionForm for MathEquation {
    const KIND: QuestionKind = QuestionKind::MathEquation;

    fn decode(raw: &str) -> Self {
        match raw.split_once(FIELD_DELIMITER) {
            Some((equation, answer)) => Self {
                equation: equation.to_string(),
                answer: answer.to_string(),
            },
            None => Self {
                equation: raw.to_string(),
                answer: String::new(),
            },
        }
    }

    fn encode(&self) -> String {
        format!("{}{FIELD_DELIMITER}{}", self.equation, self.answer)
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.equation.trim().is_empty() {
            issues.push(ValidationIssue::new("equation", "equation is required"));
        }
        if self.answer.trim().is_empty() {
            issues.push(ValidationIssue::new("answer", "answer is required"));
        }
        // The answer is the tail field, so only the equation must avoid '|'.
        check_delimiter(&mut issues, "equation", &self.equation);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_on_first_delimiter() {
        let form = MathEquation::decode("x + 3 = 7|x = 4");
        assert_eq!(form.equation, "x + 3 = 7");
        assert_eq!(form.answer, "x = 4");
    }

    #[test]
    fn decode_without_delimiter_keeps_equation() {
        let form = MathEquation::decode("2 + 2");
        assert_eq!(form.equation, "2 + 2");
        assert!(form.answer.is_empty());
        assert_eq!(MathEquation::decode(""), MathEquation::default());
    }

    #[test]
    fn roundtrip() {
        let form = MathEquation {
            equation: "12 / 4 = ?".into(),
            answer: "3".into(),
        };
        assert!(form.is_complete());
        assert_eq!(MathEquation::decode(&form.encode()), form);
    }

    #[test]
    fn both_fields_required() {
        let form = MathEquation {
            equation: "5 - 1".into(),
            answer: "   ".into(),
        };
        let issues = form.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "answer");
        assert_eq!(MathEquation::default().issues().len(), 2);
    }

    #[test]
    fn delimiter_in_equation_is_reported() {
        let form = MathEquation {
            equation: "|x| = 3".into(),
            answer: "x = 3 or x = -3".into(),
        };
        let issues = form.issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("reserved character"));
    }
}
