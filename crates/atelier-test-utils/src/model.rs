//! Mock model providers for exercising the generation pipeline.

use async_trait::async_trait;
use atelier_protocol::{ModelError, ModelProvider, PromptMessages};
use parking_lot::Mutex;
use std::sync::Arc;

/// Provider that always returns the same canned response.
#[derive(Debug, Clone)]
pub struct FixedModel {
    response: String,
}

impl FixedModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for FixedModel {
    async fn chat(&self, _messages: &PromptMessages) -> Result<String, ModelError> {
        Ok(self.response.clone())
    }
}

/// Provider that always fails, for timeout/transport failure paths.
#[derive(Debug, Clone)]
pub struct FailingModel {
    message: String,
}

impl FailingModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for FailingModel {
    async fn chat(&self, _messages: &PromptMessages) -> Result<String, ModelError> {
        Err(ModelError::Request(self.message.clone()))
    }
}

/// Provider that records every message pair it is called with.
#[derive(Debug, Clone)]
pub struct RecordingModel {
    response: String,
    calls: Arc<Mutex<Vec<PromptMessages>>>,
}

impl RecordingModel {
    /// Create a recording provider and a handle to its recorded calls.
    pub fn new(response: impl Into<String>) -> (Self, Arc<Mutex<Vec<PromptMessages>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                response: response.into(),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl ModelProvider for RecordingModel {
    async fn chat(&self, messages: &PromptMessages) -> Result<String, ModelError> {
        self.calls.lock().push(messages.clone());
        Ok(self.response.clone())
    }
}
