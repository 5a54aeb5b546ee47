//! Model boundary: the opaque "prompt in, text out" collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Composed instruction pair sent to the external model.
///
/// System instruction and user content are kept as separate roles; they are
/// never concatenated into one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessages {
    /// System instruction, including the structural output contract.
    pub system: String,
    /// Verbatim user content.
    pub user: String,
}

/// Errors surfaced by a model provider.
///
/// Callers treat every variant uniformly as a generation failure; the split
/// exists only for server-side logging.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request could not be sent or timed out.
    #[error("model request failed: {0}")]
    Request(String),
    /// The provider answered, but the response was unusable.
    #[error("model response unusable: {0}")]
    Response(String),
}

/// External text-generation model used by the generation service.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send the composed messages and return the raw text response.
    async fn chat(&self, messages: &PromptMessages) -> Result<String, ModelError>;
}
