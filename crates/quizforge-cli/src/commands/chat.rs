//! The `quizforge chat` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_client::config::load_config_from;
use quizforge_client::{ChatSession, WebhookChatClient};

pub async fn execute(message: String, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(!message.trim().is_empty(), "message is empty");

    let config = load_config_from(config_path.as_deref())?;
    let client = WebhookChatClient::from_config(&config.chat)?;
    let mut session = ChatSession::from_config(&config.chat);

    if let Some(reply) = session.send(&client, &message).await {
        println!("{}", reply.text);
    }
    Ok(())
}
