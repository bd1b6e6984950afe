//! Performance grading: totals and letter grades from up to four scores.
//!
//! A missing score is `None`, never zero. The total is the mean of the
//! scores that are present, so a student graded on one component already
//! receives a grade.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive lower bound of each passing letter, highest first.
const THRESHOLDS: [(f64, LetterGrade); 5] = [
    (90.0, LetterGrade::A),
    (80.0, LetterGrade::B),
    (70.0, LetterGrade::C),
    (60.0, LetterGrade::D),
    (50.0, LetterGrade::E),
];

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 6] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::E,
        LetterGrade::F,
    ];

    /// The letter for a total on the 0–100 scale.
    pub fn for_total(total: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| total >= *min)
            .map_or(LetterGrade::F, |(_, grade)| *grade)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
            LetterGrade::F => "F",
        };
        f.write_str(s)
    }
}

/// Total and grade for one student. Both are `None` when no score exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub total: Option<f64>,
    pub grade: Option<LetterGrade>,
}

/// Round half-up to two decimals.
pub fn round2(value: f64) -> f64 {
    // The epsilon keeps values like 89.995 (stored as 89.99499…) rounding up.
    (value * 100.0 + 0.5 + 1e-9).floor() / 100.0
}

/// Average the present scores into a total and a letter grade.
pub fn calculate(
    assignment1: Option<f64>,
    assignment2: Option<f64>,
    cat: Option<f64>,
    exam: Option<f64>,
) -> GradeSummary {
    let present: Vec<f64> = [assignment1, assignment2, cat, exam]
        .into_iter()
        .flatten()
        .collect();
    if present.is_empty() {
        return GradeSummary::default();
    }
    let total = round2(present.iter().sum::<f64>() / present.len() as f64);
    GradeSummary {
        total: Some(total),
        grade: Some(LetterGrade::for_total(total)),
    }
}

pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// The four graded components of a performance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreField {
    Assignment1,
    Assignment2,
    Cat,
    Exam,
}

impl ScoreField {
    pub const ALL: [ScoreField; 4] = [
        ScoreField::Assignment1,
        ScoreField::Assignment2,
        ScoreField::Cat,
        ScoreField::Exam,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreField::Assignment1 => "Assignment 1",
            ScoreField::Assignment2 => "Assignment 2",
            ScoreField::Cat => "CAT",
            ScoreField::Exam => "Exam",
        }
    }
}

/// One student's scores for a course term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    #[serde(alias = "StudentId")]
    pub student_id: String,
    #[serde(default, alias = "StudentName")]
    pub student_name: String,
    #[serde(default, alias = "Assignment1")]
    pub assignment1: Option<f64>,
    #[serde(default, alias = "Assignment2")]
    pub assignment2: Option<f64>,
    #[serde(default, alias = "CAT", alias = "Cat")]
    pub cat: Option<f64>,
    #[serde(default, alias = "Exam")]
    pub exam: Option<f64>,
    #[serde(default, alias = "Remarks")]
    pub remarks: String,
}

impl PerformanceRow {
    pub fn new(student_id: impl Into<String>, student_name: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: student_name.into(),
            ..Self::default()
        }
    }

    pub fn score(&self, field: ScoreField) -> Option<f64> {
        match field {
            ScoreField::Assignment1 => self.assignment1,
            ScoreField::Assignment2 => self.assignment2,
            ScoreField::Cat => self.cat,
            ScoreField::Exam => self.exam,
        }
    }

    /// Set or clear a score. Out-of-range values are dropped silently and
    /// the previous value is kept; returns whether the update was applied.
    pub fn set_score(&mut self, field: ScoreField, score: Option<f64>) -> bool {
        if let Some(value) = score {
            if !is_valid_score(value) {
                tracing::debug!(
                    student = %self.student_id,
                    field = field.label(),
                    value,
                    "dropping out-of-range score"
                );
                return false;
            }
        }
        let slot = match field {
            ScoreField::Assignment1 => &mut self.assignment1,
            ScoreField::Assignment2 => &mut self.assignment2,
            ScoreField::Cat => &mut self.cat,
            ScoreField::Exam => &mut self.exam,
        };
        *slot = score;
        true
    }

    pub fn summary(&self) -> GradeSummary {
        calculate(self.assignment1, self.assignment2, self.cat, self.exam)
    }

    /// Scores outside 0–100 that arrived from an external source.
    pub fn invalid_fields(&self) -> Vec<ScoreField> {
        ScoreField::ALL
            .into_iter()
            .filter(|f| self.score(*f).is_some_and(|s| !is_valid_score(s)))
            .collect()
    }
}

/// How many students received each letter, plus those with no score yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    pub counts: Vec<(LetterGrade, usize)>,
    pub ungraded: usize,
}

impl GradeDistribution {
    pub fn from_rows(rows: &[PerformanceRow]) -> Self {
        let mut counts: Vec<(LetterGrade, usize)> =
            LetterGrade::ALL.iter().map(|g| (*g, 0)).collect();
        let mut ungraded = 0;
        for row in rows {
            match row.summary().grade {
                Some(grade) => {
                    if let Some(entry) = counts.iter_mut().find(|(g, _)| *g == grade) {
                        entry.1 += 1;
                    }
                }
                None => ungraded += 1,
            }
        }
        Self { counts, ungraded }
    }

    pub fn count(&self, grade: LetterGrade) -> usize {
        self.counts
            .iter()
            .find(|(g, _)| *g == grade)
            .map_or(0, |(_, n)| *n)
    }
}
