//! Generation service: prompt in, stamped design specification out.

use crate::error::AtelierCoreError;
use crate::prompt;
use atelier_protocol::{DesignSpecification, ModelProvider, PromptMessages};
use log::{info, warn};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Turns free-text prompts into design specifications via the external model.
///
/// Failures are never retried here; retry policy belongs to the caller, which
/// treats every failure as one uniform "please try again" condition.
pub struct GenerationService {
    provider: Arc<dyn ModelProvider>,
}

impl GenerationService {
    /// Create a service over the given model provider.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Generate a new design specification from a user prompt.
    pub async fn generate(
        &self,
        user_text: &str,
        design_type: Option<&str>,
    ) -> Result<DesignSpecification, AtelierCoreError> {
        let messages = prompt::compose_generation(design_type, user_text);
        let spec = self.run_model(&messages, user_text).await?;
        info!(
            "design generated (design_id={}, type={}, components={})",
            spec.id,
            spec.design_type,
            spec.components.len()
        );
        Ok(spec)
    }

    /// Derive a modified design specification from a prior one.
    ///
    /// The archetype hint defaults to the prior design's type so edits keep
    /// their archetype unless the model changes it.
    pub async fn modify(
        &self,
        prior: &DesignSpecification,
        edit_text: &str,
        modification: &str,
    ) -> Result<DesignSpecification, AtelierCoreError> {
        let messages = prompt::compose_modification(prior, edit_text)?;
        let mut spec = self.run_model(&messages, edit_text).await?;
        spec.parent_id = Some(prior.id);
        spec.modification = Some(modification.to_string());
        info!(
            "design modified (design_id={}, parent_id={}, modification={})",
            spec.id, prior.id, modification
        );
        Ok(spec)
    }

    async fn run_model(
        &self,
        messages: &PromptMessages,
        prompt_text: &str,
    ) -> Result<DesignSpecification, AtelierCoreError> {
        let raw = self.provider.chat(messages).await.map_err(|err| {
            warn!("model call failed: {err}");
            AtelierCoreError::Generation(err.to_string())
        })?;
        parse_specification(&raw, prompt_text)
    }
}

/// Parse untrusted model output into a stamped specification.
///
/// No partial recovery: anything that is not a JSON object with a sequence
/// `components` field (when present) is a generation failure. Identity and
/// timestamp metadata is stamped server-side, overwriting any same-named
/// fields the model may have produced.
fn parse_specification(
    raw: &str,
    prompt_text: &str,
) -> Result<DesignSpecification, AtelierCoreError> {
    let mut value: Value = serde_json::from_str(raw)
        .map_err(|err| AtelierCoreError::Generation(format!("model output is not JSON: {err}")))?;

    let object = value.as_object_mut().ok_or_else(|| {
        AtelierCoreError::Generation("model output is not a JSON object".to_string())
    })?;

    if let Some(components) = object.get("components")
        && !components.is_array()
    {
        return Err(AtelierCoreError::Generation(
            "model output has a non-sequence components field".to_string(),
        ));
    }

    object.insert("id".to_string(), json!(Uuid::new_v4()));
    object.insert("timestamp".to_string(), json!(chrono::Utc::now()));
    object.insert("prompt".to_string(), json!(prompt_text));

    serde_json::from_value(value).map_err(|err| {
        AtelierCoreError::Generation(format!("model output does not match the design schema: {err}"))
    })
}
