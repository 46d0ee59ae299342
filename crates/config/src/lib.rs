//! Configuration loading, validation, and management for Persona.
//!
//! Loads configuration from `persona.toml` (a missing file means defaults),
//! then applies environment variable overrides. Validates all settings at
//! startup.

use persona_core::IdentitySource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "persona.toml";

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// The root configuration structure. Maps directly to `persona.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// "openrouter" or "openai". Unset means it follows whichever key was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Base URL override for the completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Bound on model calls per turn. Unset means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,

    /// Timeout for each completion request. Unset means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "deepseek/deepseek-r1".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    3679
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_iterations", &self.max_iterations)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("identity", &self.identity)
            .field("notify", &self.notify)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// The name the assistant speaks as
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_resume_path")]
    pub resume_path: PathBuf,

    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,

    /// Replaces the composed system prompt entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

fn default_identity_name() -> String {
    "Soumyadip Malash".into()
}
fn default_resume_path() -> PathBuf {
    PathBuf::from("me/resume.pdf")
}
fn default_summary_path() -> PathBuf {
    PathBuf::from("me/summary.txt")
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: default_identity_name(),
            resume_path: default_resume_path(),
            summary_path: default_summary_path(),
            system_prompt_override: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushover_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushover_user: Option<String>,

    #[serde(default = "default_pushover_url")]
    pub api_url: String,
}

fn default_pushover_url() -> String {
    PUSHOVER_API_URL.into()
}

impl NotifyConfig {
    /// Both the token and the user key are present and non-empty.
    pub fn is_configured(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.pushover_token) && present(&self.pushover_user)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            pushover_token: None,
            pushover_user: None,
            api_url: default_pushover_url(),
        }
    }
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("pushover_token", &redact(&self.pushover_token))
            .field("pushover_user", &redact(&self.pushover_user))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    7860
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, then apply process environment overrides.
    ///
    /// Recognised variables:
    /// - `OPENROUTER_API_KEY`, then `OPENAI_API_KEY`
    /// - `PERSONA_PROVIDER`, `PERSONA_API_URL`, `PERSONA_MODEL`, `PERSONA_NAME`, `PERSONA_PORT`
    /// - `PUSHOVER_TOKEN`, `PUSHOVER_USER`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("OPENROUTER_API_KEY") {
            self.api_key = Some(key);
            self.provider.get_or_insert_with(|| "openrouter".into());
        } else if let Some(key) = var("OPENAI_API_KEY") {
            self.api_key = Some(key);
            self.provider.get_or_insert_with(|| "openai".into());
        }

        if let Some(provider) = var("PERSONA_PROVIDER") {
            self.provider = Some(provider);
        }
        if let Some(url) = var("PERSONA_API_URL") {
            self.api_url = Some(url);
        }
        if let Some(model) = var("PERSONA_MODEL") {
            self.model = model;
        }
        if let Some(name) = var("PERSONA_NAME") {
            self.identity.name = name;
        }
        if let Some(token) = var("PUSHOVER_TOKEN") {
            self.notify.pushover_token = Some(token);
        }
        if let Some(user) = var("PUSHOVER_USER") {
            self.notify.pushover_user = Some(user);
        }
        if let Some(port) = var("PERSONA_PORT") {
            self.gateway.port = port.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("PERSONA_PORT must be a port number, got '{port}'"))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError("max_tokens must be > 0".into()));
        }

        if self.max_iterations == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_iterations must be > 0 when set".into(),
            ));
        }

        if let Some(provider) = &self.provider {
            if provider != "openrouter" && provider != "openai" {
                return Err(ConfigError::ValidationError(format!(
                    "unknown provider '{provider}' (expected 'openrouter' or 'openai')"
                )));
            }
        }

        Ok(())
    }

    /// Check if an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// The API key, or the fatal startup error when there is none.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// The provider to use. Falls back to "openai" when nothing chose one.
    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().unwrap_or("openai")
    }

    /// The completion base URL: explicit override, else the provider's default.
    pub fn base_url(&self) -> &str {
        match self.api_url.as_deref() {
            Some(url) => url,
            None if self.provider_name() == "openrouter" => OPENROUTER_BASE_URL,
            None => OPENAI_BASE_URL,
        }
    }

    /// Where the identity context should be loaded from.
    pub fn identity_source(&self) -> IdentitySource {
        IdentitySource {
            name: self.identity.name.clone(),
            resume_path: self.identity.resume_path.clone(),
            summary_path: self.identity.summary_path.clone(),
            system_prompt_override: self.identity.system_prompt_override.clone(),
        }
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: None,
            api_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_iterations: None,
            request_timeout_secs: None,
            identity: IdentityConfig::default(),
            notify: NotifyConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("API key missing! Set OPENROUTER_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,
}
