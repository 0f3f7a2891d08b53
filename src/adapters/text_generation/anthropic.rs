//! Anthropic implementation of the TextGeneration port.
//!
//! Non-streaming Messages API client. Transient failures are retried with
//! exponential backoff up to the configured attempt count.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationRequest, GeneratorInfo, TextGeneration, TextGenerationError};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic generator.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API generator implementation.
pub struct AnthropicGenerator {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: AnthropicConfig) -> Result<Self, TextGenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TextGenerationError::network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    fn to_api_request(&self, request: &GenerationRequest) -> MessagesRequest {
        MessagesRequest {
            model: request.config.model.clone(),
            max_tokens: request.config.max_tokens,
            temperature: request.config.temperature,
            system: request.system_prompt.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        }
    }

    async fn send_once(&self, request: &GenerationRequest) -> Result<String, TextGenerationError> {
        let api_request = self.to_api_request(request);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TextGenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    TextGenerationError::network(format!("connection failed: {e}"))
                } else {
                    TextGenerationError::network(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::parse(e.to_string()))?;

        let text = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(TextGenerationError::parse("response contained no text"));
        }
        Ok(text)
    }

    async fn check_status(response: Response) -> Result<Response, TextGenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(TextGenerationError::AuthenticationFailed),
            429 => Err(TextGenerationError::RateLimited {
                retry_after_secs: 30,
            }),
            500..=599 => Err(TextGenerationError::unavailable(format!(
                "server error {status}: {body}"
            ))),
            _ => Err(TextGenerationError::unavailable(format!(
                "unexpected status {status}: {body}"
            ))),
        }
    }

    async fn send_with_retries(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, TextGenerationError> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let backoff = Duration::from_millis(500 * 2u64.pow(attempt));
                    tracing::debug!(error = %err, attempt, "retrying generation after backoff");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Extracts a JSON value from generated text, tolerating code fences.
    fn extract_json(text: &str) -> Result<serde_json::Value, TextGenerationError> {
        let trimmed = text.trim();
        let stripped = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .map(|rest| rest.trim_end_matches("```"))
            .unwrap_or(trimmed)
            .trim();

        serde_json::from_str(stripped)
            .map_err(|e| TextGenerationError::parse(format!("invalid JSON in response: {e}")))
    }
}

#[async_trait]
impl TextGeneration for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TextGenerationError> {
        self.send_with_retries(&request).await
    }

    async fn generate_structured(
        &self,
        request: GenerationRequest,
    ) -> Result<serde_json::Value, TextGenerationError> {
        let text = self.send_with_retries(&request).await?;
        Self::extract_json(&text)
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("anthropic", "claude-3-5-sonnet-20241022")
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}
