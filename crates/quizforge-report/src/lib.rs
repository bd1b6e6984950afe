//! quizforge-report — gradebook exports.
//!
//! CSV files for the performance sheet and the student roster, and a
//! self-contained HTML gradebook with a grade-distribution chart.

pub mod csv;
pub mod html;

use serde::{Deserialize, Serialize};

/// Identifies the sheet being exported; used for titles and file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTerm {
    pub course_title: String,
    pub term: String,
    pub academic_year: String,
}

impl CourseTerm {
    pub fn new(
        course_title: impl Into<String>,
        term: impl Into<String>,
        academic_year: impl Into<String>,
    ) -> Self {
        Self {
            course_title: course_title.into(),
            term: term.into(),
            academic_year: academic_year.into(),
        }
    }
}
