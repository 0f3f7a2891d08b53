//! Mock text generator for testing and offline runs.
//!
//! Configurable to return queued responses, simulate latency, or inject
//! errors; records every request for verification. Clones share state so a
//! test can keep a handle while the assessor owns another.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationRequest, GeneratorInfo, TextGeneration, TextGenerationError};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return generated text.
    Text(String),
    /// Return a structured JSON value.
    Structured(serde_json::Value),
    /// Fail with an unavailable error.
    Unavailable(String),
    /// Fail with a network error.
    Network(String),
}

/// Mock implementation of the TextGeneration port.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// Creates a mock with no queued responses.
    ///
    /// With an empty queue every call returns a canned default response, so
    /// the mock also serves as the offline generator for CLI runs without an
    /// API key.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a text response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Text(text.into()));
        self
    }

    /// Queues a structured response.
    pub fn with_structured(self, value: serde_json::Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Structured(value));
        self
    }

    /// Queues an unavailable error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Unavailable(message.into()));
        self
    }

    /// Queues a network error.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Network(message.into()));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    async fn next_response(&self, request: GenerationRequest) -> Result<MockResponse, TextGenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text("（离线模式）感谢你的分享，请继续保持关注自己的状态。".to_string()));

        match response {
            MockResponse::Unavailable(message) => Err(TextGenerationError::unavailable(message)),
            MockResponse::Network(message) => Err(TextGenerationError::network(message)),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl TextGeneration for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TextGenerationError> {
        match self.next_response(request).await? {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Structured(value) => Ok(value.to_string()),
            _ => unreachable!("errors are returned by next_response"),
        }
    }

    async fn generate_structured(
        &self,
        request: GenerationRequest,
    ) -> Result<serde_json::Value, TextGenerationError> {
        match self.next_response(request).await? {
            MockResponse::Structured(value) => Ok(value),
            MockResponse::Text(text) => serde_json::from_str(&text)
                .map_err(|e| TextGenerationError::parse(e.to_string())),
            _ => unreachable!("errors are returned by next_response"),
        }
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("mock", "mock-model")
    }
}
