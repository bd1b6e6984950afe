//! quizforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const TOKEN_ENV: &str = "QUIZFORGE_API_TOKEN";
pub const WEBHOOK_ENV: &str = "QUIZFORGE_WEBHOOK_URL";

/// Chat assistant webhook settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Sent as `userId` with every message.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Shown when the webhook answers without a `response` field.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

fn default_fallback_message() -> String {
    crate::chat::DEFAULT_FALLBACK.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            user_id: default_user_id(),
            fallback_message: default_fallback_message(),
        }
    }
}

/// Course REST API settings.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub api: ApiConfig,
    /// Where CSV and HTML exports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Chart height in pixels, used to scale bar thickness.
    #[serde(default = "default_chart_height")]
    pub chart_height: f64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizforge-exports")
}

fn default_chart_height() -> f64 {
    quizforge_core::chart::REFERENCE_HEIGHT
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            api: ApiConfig::default(),
            output_dir: default_output_dir(),
            chart_height: default_chart_height(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve `${VAR}` references, dropping settings that resolve to nothing.
fn resolve_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(resolve_env_vars)
        .filter(|v| !v.trim().is_empty())
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_API_TOKEN`, `QUIZFORGE_WEBHOOK_URL`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        config.api.token = Some(token);
    }
    if let Ok(url) = std::env::var(WEBHOOK_ENV) {
        config.chat.webhook_url = Some(url);
    }

    config.api.base_url = resolve_optional(&config.api.base_url);
    config.api.token = resolve_optional(&config.api.token);
    config.chat.webhook_url = resolve_optional(&config.chat.webhook_url);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
