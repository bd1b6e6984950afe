//! Learner chat assistant: webhook client and conversation state.
//!
//! The assistant lives behind a webhook. Each user message is posted as
//! `{message, timestamp, userId, sessionId}` and the reply's optional
//! `response` field is appended to the transcript. Only one message may be
//! in flight at a time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::error::ClientError;

/// Shown when the webhook reply carries no `response`.
pub const DEFAULT_FALLBACK: &str =
    "Sorry, I couldn't come up with an answer to that. Could you rephrase?";

/// Shown when the webhook could not be reached.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Something that can answer a chat message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;
}

/// Posts chat messages to a webhook URL.
pub struct WebhookChatClient {
    url: String,
    client: reqwest::Client,
}

impl WebhookChatClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ClientError> {
        let url = config
            .webhook_url
            .as_deref()
            .ok_or_else(|| ClientError::MissingConfig("chat.webhook_url".into()))?;
        Ok(Self::new(url))
    }
}

#[async_trait]
impl ChatBackend for WebhookChatClient {
    #[instrument(skip(self, request), fields(session = %request.session_id))]
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(ChatReply::default());
        }
        serde_json::from_str(&body).map_err(|e| ClientError::UnexpectedBody(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// One learner's conversation with the assistant.
#[derive(Debug, Clone)]
pub struct ChatSession {
    session_id: Uuid,
    user_id: String,
    fallback_message: String,
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id: user_id.into(),
            fallback_message: DEFAULT_FALLBACK.to_string(),
            messages: Vec::new(),
            loading: false,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        let mut session = Self::new(config.user_id.clone());
        session.fallback_message = config.fallback_message.clone();
        session
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Record a user message and build its request.
    ///
    /// Returns `None` for blank input or while a previous message is still
    /// awaiting its reply.
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }
        let now = Utc::now();
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            at: now,
        });
        self.loading = true;
        Some(ChatRequest {
            message: text.to_string(),
            timestamp: now,
            user_id: self.user_id.clone(),
            session_id: self.session_id,
        })
    }

    /// Append the assistant's reply, or a canned message when there is none.
    pub fn complete(&mut self, result: Result<ChatReply, ClientError>) -> &ChatMessage {
        self.loading = false;
        let text = match result {
            Ok(reply) => match reply.response {
                Some(text) if !text.trim().is_empty() => text,
                _ => self.fallback_message.clone(),
            },
            Err(e) => {
                tracing::warn!("chat request failed: {e}");
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        };
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            text,
            at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Send one message through `backend` and return the assistant's reply.
    pub async fn send(&mut self, backend: &dyn ChatBackend, text: &str) -> Option<&ChatMessage> {
        let request = self.begin(text)?;
        let result = backend.send(&request).await;
        Some(self.complete(result))
    }
}
