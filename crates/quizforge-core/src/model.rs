//! Core data model types for quizforge.
//!
//! An [`AuthoredQuestion`] carries its structured payload; the flat
//! [`WireQuestion`] record is what the backend schema stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuestionError;
use crate::questions::QuestionPayload;

/// Three-valued difficulty used for grouping and filtering, not scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// The five authorable question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    FillInBlank,
    MathEquation,
    NumberSequence,
    SelectChoice,
    WordProblems,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 5] = [
        QuestionKind::FillInBlank,
        QuestionKind::MathEquation,
        QuestionKind::NumberSequence,
        QuestionKind::SelectChoice,
        QuestionKind::WordProblems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::FillInBlank => "fill_in_blank",
            QuestionKind::MathEquation => "math_equation",
            QuestionKind::NumberSequence => "number_sequence",
            QuestionKind::SelectChoice => "select_choice",
            QuestionKind::WordProblems => "word_problems",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "fillinblank" | "fillintheblank" | "fillblank" => Ok(QuestionKind::FillInBlank),
            "mathequation" | "equation" => Ok(QuestionKind::MathEquation),
            "numbersequence" | "sequence" => Ok(QuestionKind::NumberSequence),
            "selectchoice" | "multiplechoice" | "choice" => Ok(QuestionKind::SelectChoice),
            "wordproblems" | "wordproblem" => Ok(QuestionKind::WordProblems),
            _ => Err(QuestionError::UnknownKind(s.to_string())),
        }
    }
}

/// One teacher-created question as held in the authoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredQuestion {
    /// Optional identifier (bank files may assign one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The structured, type-specific payload.
    pub question: QuestionPayload,
    /// Free-text explanation, kept apart from the payload.
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl AuthoredQuestion {
    pub fn new(question: QuestionPayload, explanation: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: None,
            question,
            explanation: explanation.into(),
            difficulty,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.question.kind()
    }

    /// Flatten into the record the backend stores.
    pub fn to_wire(&self) -> WireQuestion {
        WireQuestion {
            question_type: self.kind(),
            equation: self.question.encode(),
            explanation: self.explanation.clone(),
            difficulty: self.difficulty,
        }
    }

    /// Rebuild from a stored record. Never fails: a malformed `equation`
    /// decodes to the type's empty form.
    pub fn from_wire(wire: &WireQuestion) -> Self {
        Self {
            id: None,
            question: QuestionPayload::decode(wire.question_type, &wire.equation),
            explanation: wire.explanation.clone(),
            difficulty: wire.difficulty,
        }
    }
}

/// The flat transport record: one opaque `equation` string per question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQuestion {
    pub question_type: QuestionKind,
    pub equation: String,
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// A student on a course roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(alias = "StudentId", alias = "id")]
    pub student_id: String,
    #[serde(alias = "FirstName")]
    pub first_name: String,
    #[serde(alias = "LastName")]
    pub last_name: String,
    #[serde(default, alias = "Email")]
    pub email: String,
    #[serde(default, alias = "Phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "EnrolledAt", alias = "enrollmentDate")]
    pub enrolled_at: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::math_equation::MathEquation;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn kind_parse_accepts_common_spellings() {
        assert_eq!(
            "FillInTheBlank".parse::<QuestionKind>().unwrap(),
            QuestionKind::FillInBlank
        );
        assert_eq!(
            "math-equation".parse::<QuestionKind>().unwrap(),
            QuestionKind::MathEquation
        );
        assert_eq!(
            "word_problems".parse::<QuestionKind>().unwrap(),
            QuestionKind::WordProblems
        );
        assert!("essay".parse::<QuestionKind>().is_err());
        for kind in QuestionKind::ALL {
            assert_eq!(kind.as_str().parse::<QuestionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn wire_roundtrip_keeps_explanation_apart() {
        let question = AuthoredQuestion::new(
            QuestionPayload::MathEquation(MathEquation {
                equation: "3 x 4 = ?".into(),
                answer: "12".into(),
            }),
            "Multiply the two factors",
            Difficulty::Easy,
        );
        let wire = question.to_wire();
        assert_eq!(wire.question_type, QuestionKind::MathEquation);
        assert_eq!(wire.equation, "3 x 4 = ?|12");
        assert_eq!(wire.explanation, "Multiply the two factors");

        assert_eq!(AuthoredQuestion::from_wire(&wire), question);
    }

    #[test]
    fn wire_record_uses_camel_case() {
        let wire = WireQuestion {
            question_type: QuestionKind::NumberSequence,
            equation: "1,2,3".into(),
            explanation: String::new(),
            difficulty: Difficulty::Hard,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["questionType"], "number_sequence");
        assert_eq!(json["difficulty"], "Hard");
    }

    #[test]
    fn student_accepts_pascal_case_keys() {
        let json = r#"{"StudentId": "S1", "FirstName": "Ada", "LastName": "Lovelace"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.student_id, "S1");
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert!(student.phone.is_none());
    }
}
