//! Number sequence questions: comma-joined numbers with a constant gap.
//!
//! Only the numbers travel in the `equation` string; the gap is derived from
//! the first two numbers on decode.

use serde::{Deserialize, Serialize};

use super::{QuestionForm, ValidationIssue};
use crate::model::QuestionKind;

/// Allowed deviation between a consecutive difference and the gap.
pub const GAP_TOLERANCE: f64 = 0.001;

/// Minimum number of terms a sequence must show.
pub const MIN_TERMS: usize = 3;

const NUMBER_DELIMITER: char = ',';

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumberSequence {
    pub numbers: Vec<f64>,
    pub gap: f64,
}

impl NumberSequence {
    /// Build `len` terms starting at `start`, `gap` apart.
    pub fn arithmetic(start: f64, gap: f64, len: usize) -> Self {
        let numbers = (0..len).map(|i| start + gap * i as f64).collect();
        Self { numbers, gap }
    }

    /// Gap implied by the first two numbers, or 0 when there are fewer.
    pub fn derived_gap(numbers: &[f64]) -> f64 {
        match numbers {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

/// Gaps are compared within [`GAP_TOLERANCE`], since decoding re-derives the
/// gap from the numbers.
impl PartialEq for NumberSequence {
    fn eq(&self, other: &Self) -> bool {
        self.numbers == other.numbers && (self.gap - other.gap).abs() <= GAP_TOLERANCE
    }
}

impl QuestionForm for NumberSequence {
    const KIND: QuestionKind = QuestionKind::NumberSequence;

    fn decode(raw: &str) -> Self {
        let numbers: Vec<f64> = raw
            .split(NUMBER_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    tracing::debug!("number_sequence: dropping non-numeric term {s:?}");
                    None
                }
            })
            .collect();
        let gap = Self::derived_gap(&numbers);
        Self { numbers, gap }
    }

    fn encode(&self) -> String {
        self.numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.numbers.len() < MIN_TERMS {
            issues.push(ValidationIssue::new(
                "numbers",
                format!(
                    "at least {MIN_TERMS} numbers are required (got {})",
                    self.numbers.len()
                ),
            ));
        }
        if self.numbers.iter().any(|n| !n.is_finite()) {
            issues.push(ValidationIssue::new("numbers", "all terms must be finite"));
        }
        for (i, pair) in self.numbers.windows(2).enumerate() {
            let diff = pair[1] - pair[0];
            if (diff - self.gap).abs() > GAP_TOLERANCE {
                issues.push(ValidationIssue::new(
                    "numbers",
                    format!(
                        "terms {} and {} differ by {}, expected gap {}",
                        i + 1,
                        i + 2,
                        diff,
                        self.gap
                    ),
                ));
            }
        }
        issues
    }
}
