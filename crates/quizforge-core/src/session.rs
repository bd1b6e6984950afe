//! The authoring session: the in-memory list of questions a teacher is
//! building.
//!
//! Questions enter the list only when their payload is complete, and are
//! edited by replacing the whole payload.

use crate::error::QuestionError;
use crate::model::{AuthoredQuestion, Difficulty, WireQuestion};
use crate::questions::QuestionPayload;
use crate::statistics::DifficultyStats;

#[derive(Debug, Clone, Default)]
pub struct AuthoringSession {
    questions: Vec<AuthoredQuestion>,
}

impl AuthoringSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from questions loaded elsewhere (a bank file, the backend).
    /// Incomplete questions are kept; the gate applies to new additions.
    pub fn with_questions(questions: Vec<AuthoredQuestion>) -> Self {
        Self { questions }
    }

    /// Add a question. Returns its index, or the itemized reasons it is not
    /// ready.
    pub fn add(
        &mut self,
        payload: QuestionPayload,
        explanation: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<usize, QuestionError> {
        let issues = payload.issues();
        if !issues.is_empty() {
            return Err(QuestionError::Incomplete { issues });
        }
        self.questions
            .push(AuthoredQuestion::new(payload, explanation, difficulty));
        tracing::debug!(count = self.questions.len(), "question added");
        Ok(self.questions.len() - 1)
    }

    /// Replace the payload of the question at `index`.
    pub fn replace(&mut self, index: usize, payload: QuestionPayload) -> Result<(), QuestionError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(QuestionError::IndexOutOfRange { index, len })?;
        let issues = payload.issues();
        if !issues.is_empty() {
            return Err(QuestionError::Incomplete { issues });
        }
        question.question = payload;
        Ok(())
    }

    pub fn set_explanation(&mut self, index: usize, explanation: impl Into<String>) -> Result<(), QuestionError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(QuestionError::IndexOutOfRange { index, len })?;
        question.explanation = explanation.into();
        Ok(())
    }

    pub fn set_difficulty(&mut self, index: usize, difficulty: Difficulty) -> Result<(), QuestionError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(QuestionError::IndexOutOfRange { index, len })?;
        question.difficulty = difficulty;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<AuthoredQuestion, QuestionError> {
        if index >= self.questions.len() {
            return Err(QuestionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        Ok(self.questions.remove(index))
    }

    pub fn questions(&self) -> &[AuthoredQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &AuthoredQuestion> {
        self.questions
            .iter()
            .filter(move |q| q.difficulty == difficulty)
    }

    pub fn stats(&self) -> DifficultyStats {
        DifficultyStats::from_questions(&self.questions)
    }

    /// The flat records to submit to the backend, in list order.
    pub fn to_wire(&self) -> Vec<WireQuestion> {
        self.questions.iter().map(AuthoredQuestion::to_wire).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{MathEquation, NumberSequence, SelectChoice};

    fn math(eq: &str, answer: &str) -> QuestionPayload {
        QuestionPayload::MathEquation(MathEquation {
            equation: eq.into(),
            answer: answer.into(),
        })
    }

    #[test]
    fn add_rejects_incomplete_with_reasons() {
        let mut session = AuthoringSession::new();
        let err = session
            .add(math("", ""), "", Difficulty::Easy)
            .unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert!(err.to_string().contains("equation is required"));
        assert!(session.is_empty());
    }

    #[test]
    fn add_edit_remove() {
        let mut session = AuthoringSession::new();
        let i = session
            .add(math("2 + 3", "5"), "Count on", Difficulty::Easy)
            .unwrap();
        let j = session
            .add(
                QuestionPayload::NumberSequence(NumberSequence::arithmetic(2.0, 3.0, 4)),
                "",
                Difficulty::Medium,
            )
            .unwrap();
        assert_eq!((i, j), (0, 1));

        session.replace(0, math("2 + 4", "6")).unwrap();
        assert_eq!(session.to_wire()[0].equation, "2 + 4|6");

        assert!(session.replace(0, math("2 + 4", "")).is_err());
        assert_eq!(session.to_wire()[0].equation, "2 + 4|6", "failed edit leaves question intact");

        session.set_difficulty(0, Difficulty::Hard).unwrap();
        session.set_explanation(0, "Add four").unwrap();
        assert_eq!(session.by_difficulty(Difficulty::Hard).count(), 1);

        let removed = session.remove(1).unwrap();
        assert_eq!(removed.difficulty, Difficulty::Medium);
        assert_eq!(session.len(), 1);
        assert!(matches!(
            session.remove(5),
            Err(QuestionError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn stats_follow_the_list() {
        let mut session = AuthoringSession::new();
        session.add(math("1 + 1", "2"), "", Difficulty::Easy).unwrap();
        session.add(math("9 x 9", "81"), "", Difficulty::Hard).unwrap();
        session.add(math("7 x 8", "56"), "", Difficulty::Hard).unwrap();

        let stats = session.stats();
        assert_eq!(stats.easy, 1);
        assert_eq!(stats.medium, 0);
        assert_eq!(stats.hard, 2);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn loaded_questions_are_kept_as_is() {
        let incomplete = AuthoredQuestion::new(
            QuestionPayload::SelectChoice(SelectChoice::default()),
            "",
            Difficulty::Medium,
        );
        let session = AuthoringSession::with_questions(vec![incomplete]);
        assert_eq!(session.len(), 1);
    }
}
