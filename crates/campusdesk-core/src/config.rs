//! Application configuration.
//!
//! `config.toml` holds tunables and may omit any section or field;
//! `secret.json` holds the API key and is read separately.

use serde::{Deserialize, Serialize};

use crate::issue::TransitionPolicy;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini: GeminiSettings,
    pub session: SessionSettings,
    pub issues: IssueSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    /// Model behind the helpdesk panel.
    pub chat_model: String,
    /// Model behind the Pro panel.
    pub pro_model: String,
    /// Model for sentiment classification and summaries.
    pub flash_model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            chat_model: "gemini-3-pro-preview".to_string(),
            pro_model: "gemini-3-pro-preview".to_string(),
            flash_model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Artificial delay before a login takes effect.
    pub login_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueSettings {
    pub transition_policy: TransitionPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Also write a daily-rotated log file under the data directory.
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides every configured model when set.
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The Gemini key, if one is present and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|k| !k.is_empty())
    }
}
