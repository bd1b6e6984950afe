//! quizforge-client — external service clients.
//!
//! A chat webhook client with the learner chat session state, a typed
//! client for the course REST API (rosters and performance sheets), and
//! the configuration both are built from.

pub mod chat;
pub mod config;
pub mod course_api;
pub mod error;
pub mod mock;

pub use chat::{ChatBackend, ChatSession, WebhookChatClient};
pub use config::{load_config, load_config_from, QuizforgeConfig};
pub use course_api::CourseApi;
pub use error::ClientError;
