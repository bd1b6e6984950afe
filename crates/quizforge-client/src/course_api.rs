//! Course REST API client: rosters and performance sheets.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizforge_core::grading::PerformanceRow;
use quizforge_core::Student;

use crate::config::ApiConfig;
use crate::error::ClientError;

pub struct CourseApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

/// Some deployments wrap list responses in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "students", alias = "performances", alias = "Performances")]
        data: Vec<T>,
    },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PerformanceSubmission<'a> {
    term: &'a str,
    academic_year: &'a str,
    performances: Vec<PerformanceEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PerformanceEntry<'a> {
    student_id: &'a str,
    assignment1: Option<f64>,
    assignment2: Option<f64>,
    #[serde(rename = "CAT")]
    cat: Option<f64>,
    exam: Option<f64>,
    remarks: &'a str,
}

impl<'a> From<&'a PerformanceRow> for PerformanceEntry<'a> {
    fn from(row: &'a PerformanceRow) -> Self {
        Self {
            student_id: &row.student_id,
            assignment1: row.assignment1,
            assignment2: row.assignment2,
            cat: row.cat,
            exam: row.exam,
            remarks: &row.remarks,
        }
    }
}

impl CourseApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::MissingConfig("api.base_url".into()))?;
        Ok(Self::new(base_url, config.token.clone()))
    }

    /// `{base_url}/api/courses/{course_id}/{resource}`, with the id encoded
    /// as a single path segment.
    fn url(&self, course_id: &str, resource: &str) -> Result<reqwest::Url, ClientError> {
        let invalid =
            || ClientError::MissingConfig(format!("invalid api.base_url: {}", self.base_url));
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "courses", course_id, resource]);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        url: reqwest::Url,
    ) -> Result<Vec<T>, ClientError> {
        let response = self.authorize(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        let body = response.text().await?;
        serde_json::from_str::<ListBody<T>>(&body)
            .map(ListBody::into_vec)
            .map_err(|e| ClientError::UnexpectedBody(e.to_string()))
    }

    /// The roster of a course.
    #[instrument(skip(self))]
    pub async fn fetch_students(&self, course_id: &str) -> Result<Vec<Student>, ClientError> {
        let url = self.url(course_id, "students")?;
        let students: Vec<Student> = self.get_list(url).await?;
        tracing::debug!(count = students.len(), "fetched roster");
        Ok(students)
    }

    /// Per-student scores for one term.
    #[instrument(skip(self))]
    pub async fn fetch_performance(
        &self,
        course_id: &str,
        term: &str,
        academic_year: &str,
    ) -> Result<Vec<PerformanceRow>, ClientError> {
        let mut url = self.url(course_id, "performance")?;
        url.query_pairs_mut()
            .append_pair("term", term)
            .append_pair("academicYear", academic_year);
        let rows: Vec<PerformanceRow> = self.get_list(url).await?;
        for row in &rows {
            let invalid = row.invalid_fields();
            if !invalid.is_empty() {
                tracing::warn!(
                    student = %row.student_id,
                    "scores outside 0-100: {}",
                    invalid.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
                );
            }
        }
        Ok(rows)
    }

    /// Save the scores for one term.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn submit_performance(
        &self,
        course_id: &str,
        term: &str,
        academic_year: &str,
        rows: &[PerformanceRow],
    ) -> Result<(), ClientError> {
        let body = PerformanceSubmission {
            term,
            academic_year,
            performances: rows.iter().map(PerformanceEntry::from).collect(),
        };
        let url = self.url(course_id, "performance")?;
        let response = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::grading::LetterGrade;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_performance_with_query_and_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses/MATH101/performance"))
            .and(query_param("term", "Term 1"))
            .and(query_param("academicYear", "2024/2025"))
            .and(header("authorization", "Bearer t0ken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"studentId": "S1", "studentName": "Amina", "assignment1": 89, "assignment2": 91},
                {"studentId": "S2", "studentName": "Brian", "exam": null}
            ])))
            .mount(&server)
            .await;

        let api = CourseApi::new(&server.uri(), Some("t0ken".into()));
        let rows = api
            .fetch_performance("MATH101", "Term 1", "2024/2025")
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].summary().grade, Some(LetterGrade::A));
        assert_eq!(rows[1].summary().total, None);
    }

    #[tokio::test]
    async fn fetch_students_accepts_wrapped_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses/42/students"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "students": [
                    {"StudentId": "S1", "FirstName": "Ada", "LastName": "Lovelace", "Email": "ada@example.com"}
                ]
            })))
            .mount(&server)
            .await;

        let api = CourseApi::new(&format!("{}/", server.uri()), None);
        let students = api.fetch_students("42").await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].full_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn submit_uses_pascal_case_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/courses/MATH101/performance"))
            .and(body_json(serde_json::json!({
                "Term": "Term 2",
                "AcademicYear": "2024/2025",
                "Performances": [{
                    "StudentId": "S1",
                    "Assignment1": 70.0,
                    "Assignment2": null,
                    "CAT": 65.5,
                    "Exam": null,
                    "Remarks": "Improving"
                }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut row = PerformanceRow::new("S1", "Amina");
        row.assignment1 = Some(70.0);
        row.cat = Some(65.5);
        row.remarks = "Improving".into();

        let api = CourseApi::new(&server.uri(), None);
        api.submit_performance("MATH101", "Term 2", "2024/2025", &[row])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn http_errors_keep_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("course not found"))
            .mount(&server)
            .await;

        let api = CourseApi::new(&server.uri(), None);
        let err = api.fetch_students("missing").await.unwrap_err();
        match err {
            ClientError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "course not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let api = CourseApi::new(&server.uri(), None);
        let err = api.fetch_students("1").await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedBody(_)));
    }

    #[test]
    fn course_id_stays_one_path_segment() {
        let api = CourseApi::new("https://school.example.org/v2/", None);
        let url = api.url("7/../admin?x=1#top", "students").unwrap();
        assert_eq!(
            url.as_str(),
            "https://school.example.org/v2/api/courses/7%2F..%2Fadmin%3Fx=1%23top/students"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[tokio::test]
    async fn reserved_characters_in_course_id_are_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses/A%2FB%3Fc%23d/students"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = CourseApi::new(&server.uri(), None);
        assert!(api.fetch_students("A/B?c#d").await.unwrap().is_empty());
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let api = CourseApi::new("not a url", None);
        assert!(matches!(
            api.url("1", "students"),
            Err(ClientError::MissingConfig(_))
        ));
    }

    #[test]
    fn config_requires_base_url() {
        assert!(matches!(
            CourseApi::from_config(&ApiConfig::default()),
            Err(ClientError::MissingConfig(_))
        ));
    }
}
