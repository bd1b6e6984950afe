//! Multiple choice questions.
//!
//! Encoding (6 fields):
//! `question_text|JSON(options)|JSON(correct_answers)|allow_multiple|image_url|image_description`.

use serde::{Deserialize, Serialize};

use super::{
    check_delimiter, check_list_delimiter, check_optional, decode_string_list,
    encode_string_list, non_empty, split_fields, QuestionForm, ValidationIssue,
};
use crate::model::QuestionKind;

pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectChoice {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
}

impl SelectChoice {
    /// Toggle `option` as a correct answer.
    ///
    /// Unmarks it if already correct. Otherwise, in single-answer mode the
    /// new mark replaces any previous one. Unknown options are ignored.
    pub fn mark_correct(&mut self, option: &str) {
        if !self.options.iter().any(|o| o == option) {
            return;
        }
        if let Some(pos) = self.correct_answers.iter().position(|a| a == option) {
            self.correct_answers.remove(pos);
        } else if self.allow_multiple {
            self.correct_answers.push(option.to_string());
        } else {
            self.correct_answers = vec![option.to_string()];
        }
    }

    /// Switch answer mode. Leaving multi-answer mode keeps only the first mark.
    pub fn set_allow_multiple(&mut self, allow: bool) {
        self.allow_multiple = allow;
        if !allow {
            self.correct_answers.truncate(1);
        }
    }

    pub fn add_option(&mut self, option: impl Into<String>) {
        self.options.push(option.into());
    }

    /// Remove an option and any correct-answer mark on it.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        let removed = self.options.remove(index);
        self.correct_answers.retain(|a| *a != removed);
        true
    }
}

impl QuestionForm for SelectChoice {
    const KIND: QuestionKind = QuestionKind::SelectChoice;

    fn decode(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let fields = split_fields(raw, 6);
        Self {
            question_text: fields[0].to_string(),
            options: decode_string_list(fields[1], "select_choice.options"),
            correct_answers: decode_string_list(fields[2], "select_choice.correct_answers"),
            allow_multiple: fields[3].trim() == "true",
            image_url: non_empty(fields[4]),
            image_description: non_empty(fields[5]),
        }
    }

    fn encode(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.question_text,
            encode_string_list(&self.options),
            encode_string_list(&self.correct_answers),
            self.allow_multiple,
            self.image_url.as_deref().unwrap_or_default(),
            self.image_description.as_deref().unwrap_or_default()
        )
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.question_text.trim().is_empty() {
            issues.push(ValidationIssue::new("question_text", "question text is required"));
        }
        if self.options.len() < MIN_OPTIONS {
            issues.push(ValidationIssue::new(
                "options",
                format!(
                    "at least {MIN_OPTIONS} options are required (got {})",
                    self.options.len()
                ),
            ));
        }
        for (i, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                issues.push(ValidationIssue::new("options", format!("option {} is empty", i + 1)));
            } else if self.options[..i].contains(option) {
                issues.push(ValidationIssue::new(
                    "options",
                    format!("option {} duplicates \"{option}\"", i + 1),
                ));
            }
        }

        if self.correct_answers.is_empty() {
            issues.push(ValidationIssue::new(
                "correct_answers",
                "at least one correct answer must be marked",
            ));
        }
        if !self.allow_multiple && self.correct_answers.len() > 1 {
            issues.push(ValidationIssue::new(
                "correct_answers",
                format!(
                    "only one correct answer is allowed (got {})",
                    self.correct_answers.len()
                ),
            ));
        }
        for answer in &self.correct_answers {
            if !self.options.contains(answer) {
                issues.push(ValidationIssue::new(
                    "correct_answers",
                    format!("\"{answer}\" is not one of the options"),
                ));
            }
        }

        check_delimiter(&mut issues, "question_text", &self.question_text);
        check_list_delimiter(&mut issues, "options", &self.options);
        check_optional(&mut issues, "image_url", self.image_url.as_deref());
        if self
            .image_description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            issues.push(ValidationIssue::new(
                "image_description",
                "is set but blank; leave it out instead",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitals() -> SelectChoice {
        SelectChoice {
            question_text: "Which city is the capital of Kenya?".into(),
            options: vec![
                "Mombasa".into(),
                "Nairobi".into(),
                "Kisumu".into(),
                "Nakuru".into(),
            ],
            correct_answers: vec!["Nairobi".into()],
            allow_multiple: false,
            image_url: None,
            image_description: None,
        }
    }

    #[test]
    fn roundtrip_single_answer() {
        let form = capitals();
        assert!(form.is_complete(), "{:?}", form.issues());
        let encoded = form.encode();
        assert_eq!(
            encoded,
            r#"Which city is the capital of Kenya?|["Mombasa","Nairobi","Kisumu","Nakuru"]|["Nairobi"]|false||"#
        );
        assert_eq!(SelectChoice::decode(&encoded), form);
    }

    #[test]
    fn roundtrip_with_image_and_multiple_answers() {
        let form = SelectChoice {
            question_text: "Select the prime numbers".into(),
            options: vec!["2".into(), "4".into(), "5".into(), "9".into()],
            correct_answers: vec!["2".into(), "5".into()],
            allow_multiple: true,
            image_url: Some("https://cdn.example.com/img/primes.png".into()),
            image_description: Some("A number line | from 1 to 10".into()),
        };
        assert!(form.is_complete(), "{:?}", form.issues());
        assert_eq!(SelectChoice::decode(&form.encode()), form);
    }

    #[test]
    fn single_answer_toggle_keeps_latest() {
        let mut form = capitals();
        form.correct_answers.clear();
        form.mark_correct("Mombasa");
        form.mark_correct("Nairobi");
        assert_eq!(form.correct_answers, vec!["Nairobi".to_string()]);
    }

    #[test]
    fn multiple_answer_toggle_accumulates_and_unmarks() {
        let mut form = capitals();
        form.set_allow_multiple(true);
        form.mark_correct("Kisumu");
        assert_eq!(form.correct_answers.len(), 2);
        form.mark_correct("Nairobi");
        assert_eq!(form.correct_answers, vec!["Kisumu".to_string()]);
        form.mark_correct("Atlantis");
        assert_eq!(form.correct_answers.len(), 1);
    }

    #[test]
    fn leaving_multiple_mode_truncates() {
        let mut form = capitals();
        form.set_allow_multiple(true);
        form.mark_correct("Nakuru");
        form.set_allow_multiple(false);
        assert_eq!(form.correct_answers, vec!["Nairobi".to_string()]);
    }

    #[test]
    fn decoded_single_mode_with_two_answers_is_incomplete() {
        let form = SelectChoice::decode(r#"Pick one|["a","b"]|["a","b"]|false||"#);
        assert_eq!(form.correct_answers.len(), 2);
        assert!(!form.is_complete());
    }

    #[test]
    fn requires_options_and_answer() {
        let form = SelectChoice {
            question_text: "Empty".into(),
            options: vec!["only".into()],
            ..SelectChoice::default()
        };
        let fields: Vec<_> = form.issues().into_iter().map(|i| i.field).collect();
        assert!(fields.contains(&"options".to_string()));
        assert!(fields.contains(&"correct_answers".to_string()));
    }

    #[test]
    fn removing_correct_option_unmarks_it() {
        let mut form = capitals();
        assert!(form.remove_option(1));
        assert!(form.correct_answers.is_empty());
        assert!(!form.remove_option(10));
    }

    #[test]
    fn optional_fields_roundtrip_in_every_combination() {
        let urls = [None, Some("https://cdn.example.com/map.png"), Some(""), Some("  ")];
        let descriptions = [None, Some("Map of East Africa"), Some(""), Some(" ")];
        for url in urls {
            for description in descriptions {
                let form = SelectChoice {
                    image_url: url.map(String::from),
                    image_description: description.map(String::from),
                    ..capitals()
                };
                let blank = |v: Option<&str>| v.is_some_and(|s| s.trim().is_empty());
                if blank(url) || blank(description) {
                    assert!(!form.is_complete(), "blank field accepted: {url:?} {description:?}");
                } else {
                    assert!(form.is_complete(), "{:?}", form.issues());
                    assert_eq!(SelectChoice::decode(&form.encode()), form);
                }
            }
        }
    }

    #[test]
    fn bad_json_falls_back_to_empty_lists() {
        let form = SelectChoice::decode("Question|{oops|[\"a\"]|true");
        assert_eq!(form.question_text, "Question");
        assert!(form.options.is_empty());
        assert_eq!(form.correct_answers, vec!["a".to_string()]);
        assert!(form.allow_multiple);
        assert!(form.image_url.is_none());
    }
}
