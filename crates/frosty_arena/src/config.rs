//! Player configuration: named presets and TOML player files.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Where a player's moves come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// OpenAI chat completions.
    OpenAI,
    /// DeepSeek chat completions.
    DeepSeek,
    /// Google Gemini.
    Gemini,
    /// Anthropic messages.
    Anthropic,
    /// In-process first-empty player.
    Local,
}

impl Backend {
    /// The LLM provider behind this backend, `None` for local players.
    pub fn llm_provider(self) -> Option<LlmProvider> {
        match self {
            Backend::OpenAI => Some(LlmProvider::OpenAI),
            Backend::DeepSeek => Some(LlmProvider::DeepSeek),
            Backend::Gemini => Some(LlmProvider::Gemini),
            Backend::Anthropic => Some(LlmProvider::Anthropic),
            Backend::Local => None,
        }
    }

    /// Model used when a player file names none.
    pub fn default_model(self) -> &'static str {
        match self {
            Backend::OpenAI => "gpt-4o",
            Backend::DeepSeek => "deepseek-chat",
            Backend::Gemini => "gemini-pro",
            Backend::Anthropic => "claude-3-5-haiku-latest",
            Backend::Local => "first-empty",
        }
    }
}

/// A named player preset selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Preset key, e.g. `gpt4o`.
    pub key: &'static str,
    /// Display name of the player.
    pub name: &'static str,
    /// Backend to call.
    pub backend: Backend,
    /// Model to request.
    pub model: &'static str,
}

/// Built-in presets.
pub const PRESETS: &[Preset] = &[
    Preset {
        key: "gpt3",
        name: "ChatGPT",
        backend: Backend::OpenAI,
        model: "gpt-3.5-turbo",
    },
    Preset {
        key: "gpt4",
        name: "ChatGPT",
        backend: Backend::OpenAI,
        model: "gpt-4-turbo",
    },
    Preset {
        key: "gpt4o",
        name: "ChatGPT",
        backend: Backend::OpenAI,
        model: "gpt-4o",
    },
    Preset {
        key: "gemini",
        name: "Gemini",
        backend: Backend::Gemini,
        model: "gemini-pro",
    },
    Preset {
        key: "deepseek",
        name: "Deepseek",
        backend: Backend::DeepSeek,
        model: "deepseek-chat",
    },
    Preset {
        key: "claude",
        name: "Claude",
        backend: Backend::Anthropic,
        model: "claude-3-5-haiku-latest",
    },
    Preset {
        key: "local",
        name: "FirstEmpty",
        backend: Backend::Local,
        model: "first-empty",
    },
];

/// Configuration for one move-provider.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name used in match events.
    name: String,

    /// Backend answering move requests.
    #[serde(rename = "provider")]
    backend: Backend,

    /// Model name; the backend default when absent.
    #[serde(default)]
    model: Option<String>,

    /// Maximum tokens for each reply.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Overrides the backend's API base URL.
    #[serde(default)]
    base_url: Option<String>,
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    30
}

impl PlayerConfig {
    /// Creates a configuration with default limits.
    #[instrument(skip(name), fields(player = %name))]
    pub fn new(name: String, backend: Backend, model: Option<String>) -> Self {
        Self {
            name,
            backend,
            model,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            base_url: None,
        }
    }

    /// Looks up a built-in preset by key (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the supported presets if `key` is unknown.
    #[instrument]
    pub fn preset(key: &str) -> Result<Self, ConfigError> {
        let wanted = key.trim().to_lowercase();
        let preset = PRESETS.iter().find(|p| p.key == wanted).ok_or_else(|| {
            let supported: Vec<&str> = PRESETS.iter().map(|p| p.key).collect();
            ConfigError::new(format!(
                "Unknown player type: {}. Supported: {}",
                key,
                supported.join(", ")
            ))
        })?;

        debug!(preset = preset.key, "Resolved preset");
        Ok(Self::new(
            preset.name.to_string(),
            preset.backend,
            Some(preset.model.to_string()),
        ))
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(player = %config.name, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves a command-line player argument: a `.toml` path or a preset key.
    #[instrument]
    pub fn resolve(arg: &str) -> Result<Self, ConfigError> {
        let path = Path::new(arg);
        if path.extension().and_then(|s| s.to_str()) == Some("toml") || path.is_file() {
            Self::from_file(path)
        } else {
            Self::preset(arg)
        }
    }

    /// Model to request, falling back to the backend default.
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    /// Creates LLM configuration from this player config.
    ///
    /// Reads the backend's API key (`OPENAI_API_KEY`, `DEEPSEEK_API_KEY`,
    /// `GEMINI_API_KEY` or `ANTHROPIC_API_KEY`) from the environment.
    #[instrument(skip(self), fields(backend = %self.backend, model = %self.model_or_default()))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let provider = self.backend.llm_provider().ok_or_else(|| {
            ConfigError::new(format!("{} does not use an LLM backend", self.name))
        })?;

        let var = provider.api_key_var();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "Missing API key: {} is required for {}",
                    var, self.name
                ))
            })?;

        let mut config = LlmConfig::new(
            provider,
            api_key,
            self.model_or_default().to_string(),
            self.max_tokens,
        )
        .with_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }

        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
