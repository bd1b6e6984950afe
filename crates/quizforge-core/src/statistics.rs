//! Aggregate counts over authored questions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AuthoredQuestion, Difficulty, QuestionKind};

/// Question counts partitioned by difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    #[serde(rename = "Easy")]
    pub easy: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Hard")]
    pub hard: usize,
    pub total: usize,
}

impl DifficultyStats {
    pub fn from_questions(questions: &[AuthoredQuestion]) -> Self {
        let mut stats = Self::default();
        for q in questions {
            match q.difficulty {
                Difficulty::Easy => stats.easy += 1,
                Difficulty::Medium => stats.medium += 1,
                Difficulty::Hard => stats.hard += 1,
            }
        }
        stats.total = questions.len();
        stats
    }

    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Question counts per type. Types with no questions are absent.
pub fn count_by_kind(questions: &[AuthoredQuestion]) -> HashMap<QuestionKind, usize> {
    let mut counts = HashMap::new();
    for q in questions {
        *counts.entry(q.kind()).or_insert(0) += 1;
    }
    counts
}
