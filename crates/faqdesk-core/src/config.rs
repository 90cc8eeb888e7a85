//! FAQ Desk configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaqError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqDeskConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

impl FaqDeskConfig {
    /// Load config from the default path (~/.faqdesk/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| FaqError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FaqError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the FAQ Desk home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".faqdesk")
    }

    /// Secrets and deployment knobs supplied through the environment win over
    /// the file: `ADMIN_PASSWORD`, `GEMINI_API_KEY`, `FAQDESK_SESSION_SECRET`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(password) = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            self.admin.password = password;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|v| !v.is_empty()) {
            self.fallback.api_key = key;
        }
        if let Some(secret) = lookup("FAQDESK_SESSION_SECRET").filter(|v| !v.is_empty()) {
            self.server.session_secret = secret;
        }
    }

    /// FAQ document path with `~` expanded.
    pub fn faq_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.server.faq_file).to_string())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Location of the FAQ JSON document.
    #[serde(default = "default_faq_file")]
    pub faq_file: String,
    /// Session signing secret. Empty means a random per-process secret, so
    /// every restart logs all admins out.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
    /// Max request body in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 5000 }
fn default_faq_file() -> String { "faqs.json".into() }
fn default_session_ttl_hours() -> u32 { 12 }
fn default_body_limit() -> usize { 1_048_576 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            faq_file: default_faq_file(),
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
            body_limit: default_body_limit(),
        }
    }
}

/// Match engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum token-sort similarity (0-100) for a FAQ answer to be returned.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Longer chat questions are not scored and get the unknown answer.
    #[serde(default = "default_max_question_chars")]
    pub max_question_chars: usize,
}

fn default_threshold() -> f64 { 70.0 }
fn default_max_question_chars() -> usize { 1000 }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_question_chars: default_max_question_chars(),
        }
    }
}

/// Generative fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    /// "gemini" or "static".
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Case-insensitive substrings that allow a fallback call.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Prompt sent to the oracle; `{question}` is replaced by the user input.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
    /// Prefix for the answer returned when the oracle call fails.
    #[serde(default = "default_error_prefix")]
    pub error_prefix: String,
    /// Reply used by the "static" provider.
    #[serde(default)]
    pub static_reply: String,
}

fn bool_true() -> bool { true }
fn default_provider() -> String { "gemini".into() }
fn default_model() -> String { "gemini-2.0-flash".into() }
fn default_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_keywords() -> Vec<String> {
    ["aadhaar", "adhar", "pan card", "voter card"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_prompt_template() -> String {
    "Please answer the following question in a single paragraph of about 40 to 50 words, \
     and then provide a concise list of the most important steps related to the answer. \
     \nQuestion: {question}"
        .into()
}
fn default_error_prefix() -> String { "Error from Gemini API: ".into() }

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            keywords: default_keywords(),
            prompt_template: default_prompt_template(),
            error_prefix: default_error_prefix(),
            static_reply: String::new(),
        }
    }
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin password. Empty disables admin login entirely.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}
