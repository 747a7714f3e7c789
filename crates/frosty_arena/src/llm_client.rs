//! LLM API client abstraction for OpenAI, DeepSeek, Gemini and Anthropic.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
};
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// DeepSeek (OpenAI-compatible chat API).
    DeepSeek,
    /// Google Gemini.
    Gemini,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding the API key for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::DeepSeek => "DEEPSEEK_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for LLM client.
#[derive(Clone, Setters)]
#[setters(prefix = "with_")]
pub struct LlmConfig {
    #[setters(skip)]
    provider: LlmProvider,
    #[setters(skip)]
    api_key: String,
    #[setters(skip)]
    model: String,
    /// Maximum tokens the model may generate per reply.
    max_tokens: u32,
    /// Upper bound on one request, including reading the body.
    timeout: Duration,
    /// Overrides the provider's API base URL.
    #[setters(strip_option, into)]
    base_url: Option<String>,
}

impl LlmConfig {
    /// Creates a new LLM configuration with a 30 second timeout.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            timeout: Duration::from_secs(30),
            base_url: None,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Gets the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    ///
    /// The whole exchange is bounded by the configured timeout.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = %self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        let request = async {
            match self.config.provider {
                LlmProvider::OpenAI => {
                    self.generate_openai(None, true, system_prompt, user_message)
                        .await
                }
                LlmProvider::DeepSeek => {
                    self.generate_openai(
                        Some(DEEPSEEK_API_BASE),
                        false,
                        system_prompt,
                        user_message,
                    )
                    .await
                }
                LlmProvider::Gemini => self.generate_gemini(system_prompt, user_message).await,
                LlmProvider::Anthropic => {
                    self.generate_anthropic(system_prompt, user_message).await
                }
            }
        };

        tokio::time::timeout(self.config.timeout, request)
            .await
            .map_err(|_| {
                error!(timeout = ?self.config.timeout, "LLM request timed out");
                LlmError::new(format!(
                    "{} request timed out after {:?}",
                    self.config.provider, self.config.timeout
                ))
            })?
    }

    /// Generates a completion using an OpenAI-compatible chat API.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        default_base: Option<&str>,
        json_mode: bool,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Creating OpenAI-compatible client");

        let mut openai_config = OpenAIConfig::new().with_api_key(self.config.api_key.clone());
        if let Some(base) = self.config.base_url.as_deref().or(default_base) {
            openai_config = openai_config.with_api_base(base.trim_end_matches('/'));
        }
        let client = OpenAIClient::with_config(openai_config);

        debug!("Building chat completion request");
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| {
                        error!(error = ?e, "Failed to build system message");
                        LlmError::new(format!("Failed to build system message: {}", e))
                    })?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| {
                        error!(error = ?e, "Failed to build user message");
                        LlmError::new(format!("Failed to build user message: {}", e))
                    })?,
            ),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens);
        if json_mode {
            args.response_format(ResponseFormat::JsonObject);
        }
        let request = args.build().map_err(|e| {
            error!(error = ?e, "Failed to build request");
            LlmError::new(format!("Failed to build request: {}", e))
        })?;

        debug!("Sending chat completion request");
        let response = client.chat().create(request).await.map_err(|e| {
            error!(error = ?e, "Chat completion API error");
            LlmError::new(format!("{} API error: {}", self.config.provider, e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("No content in chat completion response");
                LlmError::new(format!("No content in {} response", self.config.provider))
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Google Gemini.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_gemini(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url_or(GEMINI_API_BASE),
            self.config.model
        );

        debug!("Building Gemini API request");
        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [{ "text": format!("{}\n{}", system_prompt, user_message) }]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "maxOutputTokens": self.config.max_tokens
            }
        });

        debug!("Sending request to Gemini");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.clone())
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Gemini API request failed");
                LlmError::new(format!("Gemini API request failed: {}", e))
            })?;

        let response_json = read_json(response, "Gemini").await?;

        let content = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Gemini response");
                LlmError::new("No text content in Gemini response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.config.base_url_or(ANTHROPIC_API_BASE));

        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });

        debug!("Sending request to Anthropic");
        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Anthropic API request failed");
                LlmError::new(format!("Anthropic API request failed: {}", e))
            })?;

        let response_json = read_json(response, "Anthropic").await?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

/// Reads a response body, failing on non-2xx status or invalid JSON.
async fn read_json(response: reqwest::Response, vendor: &str) -> Result<serde_json::Value, LlmError> {
    let status = response.status();
    let response_text = response.text().await.map_err(|e| {
        error!(error = ?e, vendor, "Failed to read response");
        LlmError::new(format!("Failed to read {} response: {}", vendor, e))
    })?;

    if !status.is_success() {
        error!(status = %status, response = %response_text, vendor, "API error");
        return Err(LlmError::new(format!(
            "{} API error {}: {}",
            vendor, status, response_text
        )));
    }

    debug!(response_length = response_text.len(), vendor, "Parsing response");
    serde_json::from_str(&response_text).map_err(|e| {
        error!(error = ?e, response = %response_text, vendor, "Failed to parse response");
        LlmError::new(format!("Failed to parse {} response: {}", vendor, e))
    })
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
