//! Mock chat backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::chat::{ChatBackend, ChatReply, ChatRequest};
use crate::error::ClientError;

/// A chat backend that answers from a fixed table instead of a webhook.
///
/// Replies are chosen by message substring; `None` replies model a webhook
/// that answers without a `response` field.
pub struct MockChat {
    /// Map of message substring → reply.
    replies: HashMap<String, String>,
    default_reply: Option<String>,
    /// Fail every call with a network error.
    offline: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChat {
    pub fn new(replies: HashMap<String, String>) -> Self {
        Self {
            replies,
            default_reply: None,
            offline: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always answers with `reply`.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self {
            default_reply: Some(reply.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    /// A mock whose replies never carry a `response`.
    pub fn silent() -> Self {
        Self::new(HashMap::new())
    }

    /// A mock that cannot be reached.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ChatBackend for MockChat {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        if self.offline {
            return Err(ClientError::Network("connection refused".into()));
        }

        let response = self
            .replies
            .iter()
            .find(|(key, _)| request.message.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .or_else(|| self.default_reply.clone());

        Ok(ChatReply { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatSession, CONNECTION_ERROR_MESSAGE};

    #[tokio::test]
    async fn message_matching() {
        let mut replies = HashMap::new();
        replies.insert("fraction".to_string(), "A part of a whole.".to_string());
        replies.insert("prime".to_string(), "Divisible only by 1 and itself.".to_string());
        let backend = MockChat::new(replies);

        let mut session = ChatSession::new("learner");
        let reply = session.send(&backend, "What is a prime?").await.unwrap();
        assert!(reply.text.contains("Divisible"));
        let reply = session.send(&backend, "Explain a fraction").await.unwrap();
        assert!(reply.text.contains("whole"));
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn offline_backend() {
        let backend = MockChat::offline();
        let mut session = ChatSession::new("learner");
        let reply = session.send(&backend, "hello").await.unwrap();
        assert_eq!(reply.text, CONNECTION_ERROR_MESSAGE);
        assert!(!session.is_loading(), "a failure still clears the loading flag");
    }
}
