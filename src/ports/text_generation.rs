//! Text Generation Port - Interface for the external text/LLM service.
//!
//! Consumed by the mental-health assessor only, for drafting responses. The
//! deterministic risk rules never depend on generated text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for text generation.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Generates free text for a prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<String, TextGenerationError>;

    /// Generates a structured (JSON) result for a prompt.
    async fn generate_structured(
        &self,
        request: GenerationRequest,
    ) -> Result<serde_json::Value, TextGenerationError>;

    /// Identity of the generator behind this port.
    fn generator_info(&self) -> GeneratorInfo;
}

/// Task the generation parameters are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Crisis confirmation and crisis responses.
    CrisisDetection,
    /// Ordinary therapeutic conversation.
    CasualChat,
    /// Behavior pattern analysis.
    BehaviorAnalysis,
    /// Structured risk assessment.
    RiskAssessment,
}

/// Generation parameters for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl GenerationConfig {
    /// Parameter table keyed by task.
    ///
    /// Crisis paths run cold and long; chat runs warm and short.
    pub fn for_task(task: TaskKind) -> Self {
        match task {
            TaskKind::CrisisDetection => Self {
                model: "claude-3-opus-20240229".to_string(),
                temperature: 0.3,
                max_tokens: 2000,
            },
            TaskKind::CasualChat => Self {
                model: "claude-3-5-sonnet-20241022".to_string(),
                temperature: 0.7,
                max_tokens: 500,
            },
            TaskKind::BehaviorAnalysis => Self {
                model: "claude-3-sonnet-20240229".to_string(),
                temperature: 0.5,
                max_tokens: 1500,
            },
            TaskKind::RiskAssessment => Self {
                model: "claude-3-opus-20240229".to_string(),
                temperature: 0.2,
                max_tokens: 2000,
            },
        }
    }

    /// Overrides the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// One generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt body.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Generation parameters.
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Creates a request with parameters for the given task.
    pub fn for_task(task: TaskKind, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            config: GenerationConfig::for_task(task),
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// System prompt template library.
pub struct SystemPrompts;

impl SystemPrompts {
    /// Base persona for therapeutic responses.
    pub const THERAPIST_BASE: &'static str = "You are a professional mental health assistant, using Cognitive Behavioral Therapy (CBT) principles.

Core principles:
1. Empathetic listening, build trust
2. Identify cognitive distortions and automatic thoughts
3. Guide rather than lecture
4. Focus on present feelings and thoughts
5. Provide concrete and actionable coping strategies

Safety boundaries:
- You cannot replace professional therapists
- Must transfer to human experts in crisis situations
- Do not make medical diagnoses
- Respect user privacy

Tone: Warm, professional, non-judgmental";

    /// Persona for crisis signal analysis.
    pub const CRISIS_DETECTOR: &'static str = "You are a crisis detection expert. Analyze user messages and identify risk signals.

Output JSON format with risk_level, signals, immediate_action, confidence.";
}

/// Identity of a generator implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Provider name (e.g. "anthropic", "mock").
    pub name: String,
    /// Default model identifier.
    pub model: String,
}

impl GeneratorInfo {
    /// Creates new generator info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generation errors.
#[derive(Debug, Error)]
pub enum TextGenerationError {
    /// Service is unavailable.
    #[error("generation service unavailable: {message}")]
    Unavailable { message: String },

    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl TextGenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        TextGenerationError::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        TextGenerationError::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        TextGenerationError::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TextGenerationError::RateLimited { .. }
                | TextGenerationError::Unavailable { .. }
                | TextGenerationError::Network(_)
                | TextGenerationError::Timeout { .. }
        )
    }
}
