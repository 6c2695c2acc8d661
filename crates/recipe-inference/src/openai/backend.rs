//! OpenAI-compatible query translator implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use recipe_core::defaults::{TRANSLATOR_MODEL, TRANSLATOR_TIMEOUT_SECS, TRANSLATOR_URL};
use recipe_core::{DietPresetTable, Error, QueryTranslator, Result};

use super::error::{to_translator_error, OpenAIErrorCode};
use super::types::*;
use crate::prompt::system_prompt;

/// Default OpenAI API endpoint.
pub const DEFAULT_OPENAI_URL: &str = TRANSLATOR_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = TRANSLATOR_MODEL;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = TRANSLATOR_TIMEOUT_SECS;

/// Upper bound on completion length; a query string is short.
const MAX_COMPLETION_TOKENS: u32 = 200;

/// Configuration for the OpenAI-compatible translator.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for translation.
    pub gen_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Read `OPENAI_BASE_URL`, `OPENAI_API_KEY`, `OPENAI_GEN_MODEL` and
    /// `OPENAI_TIMEOUT`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gen_model: std::env::var("OPENAI_GEN_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string()),
            timeout_seconds: std::env::var("OPENAI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// A translator is only worth building for a remote endpoint when a key
    /// is present, or when the endpoint was pointed somewhere explicitly.
    pub fn is_usable(&self) -> bool {
        self.api_key.is_some() || self.base_url != DEFAULT_OPENAI_URL
    }
}

/// Translates free text into recipe query strings with a chat completion.
pub struct OpenAITranslator {
    client: Client,
    config: OpenAIConfig,
    system_prompt: String,
}

impl OpenAITranslator {
    /// Create a translator that knows about the given presets.
    pub fn new(config: OpenAIConfig, presets: &DietPresetTable) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "translator",
            model = %config.gen_model,
            base_url = %config.base_url,
            timeout_secs = config.timeout_seconds,
            "Initializing OpenAI query translator"
        );

        Ok(Self {
            client,
            system_prompt: system_prompt(presets),
            config,
        })
    }

    /// Create from environment variables.
    pub fn from_env(presets: &DietPresetTable) -> Result<Self> {
        Self::new(OpenAIConfig::from_env(), presets)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl QueryTranslator for OpenAITranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "translator",
            model = %self.config.gen_model,
            prompt_len = text.len(),
            "Translating free-text request"
        );

        let request = ChatCompletionRequest {
            model: self.config.gen_model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(text),
            ],
            temperature: Some(0.0),
            max_tokens: Some(MAX_COMPLETION_TOKENS),
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "timed out" } else { "failed" };
                Error::Translator(format!("Request {}: {}", reason, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: "Unknown error".to_string(),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            let code = OpenAIErrorCode::from_response(status.as_u16(), &body.error.error_type);
            warn!(
                subsystem = "inference",
                component = "translator",
                status = status.as_u16(),
                error = %body.error.message,
                "Translator endpoint returned an error"
            );
            return Err(to_translator_error(
                code,
                &format!("OpenAI returned {}: {}", status, body.error.message),
            ));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Translator(format!("Failed to parse response: {}", e)))?;

        let usage = result.usage;
        let Some(choice) = result.choices.into_iter().next() else {
            return Err(Error::Translator("Model returned an empty response".to_string()));
        };

        // A cut-off query string could silently lose exclusions.
        if choice.is_truncated() {
            warn!(
                subsystem = "inference",
                component = "translator",
                max_tokens = MAX_COMPLETION_TOKENS,
                "Translator reply hit the token limit"
            );
            return Err(Error::Translator("Model reply was truncated".to_string()));
        }

        let content = choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::Translator("Model returned an empty response".to_string()));
        }

        debug!(
            subsystem = "inference",
            component = "translator",
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            prompt_tokens = usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens = usage.as_ref().map(|u| u.completion_tokens),
            total_tokens = usage.as_ref().map(|u| u.total_tokens),
            response_len = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Translation complete"
        );
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}
