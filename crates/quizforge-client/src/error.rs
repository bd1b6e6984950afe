//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the chat webhook or the course API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response (DNS, refused connection, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// A required setting is absent from the configuration.
    #[error("missing configuration: {0}")]
    MissingConfig(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::UnexpectedBody(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl ClientError {
    /// Build an `Http` error from a failed response, keeping the body text.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ClientError::Http { status, message }
    }
}
