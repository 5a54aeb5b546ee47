//! Instruction assembly for design generation and modification turns.

use crate::error::AtelierCoreError;
use atelier_protocol::{DesignSpecification, PromptMessages};

/// System instructions for the known design archetypes.
const ARCHETYPE_INSTRUCTIONS: [(&str, &str); 3] = [
    (
        "login",
        "You are an expert UI/UX designer. Create a detailed design specification \
         for a login screen based on the user's requirements.",
    ),
    (
        "dashboard",
        "You are an expert UI/UX designer. Create a detailed design specification \
         for a dashboard interface based on the user's requirements.",
    ),
    (
        "landing",
        "You are an expert UI/UX designer. Create a detailed design specification \
         for a landing page based on the user's requirements.",
    ),
];

/// Fallback instruction for unrecognized or absent archetype hints.
const GENERIC_INSTRUCTION: &str = "You are an expert UI/UX designer. Create a detailed \
     design specification based on the user's requirements.";

/// Structural contract appended to every system instruction so the model's
/// free-text output is steered toward the design schema.
const STRUCTURE_CONTRACT: &str = r##"Return a JSON object with the following structure:
{
  "type": "design-type",
  "title": "Design Title",
  "description": "Brief description",
  "components": [
    {
      "id": "unique-id",
      "type": "component-type",
      "properties": {
        "text": "content",
        "style": "styling-info",
        "position": "layout-info"
      }
    }
  ],
  "layout": {
    "width": 1200,
    "height": 800,
    "background": "#ffffff"
  },
  "figmaInstructions": [
    "Step-by-step instructions for the design-tool plugin"
  ]
}"##;

/// Resolve the system instruction for an archetype hint.
pub fn system_instruction(design_type: Option<&str>) -> &'static str {
    let Some(hint) = design_type else {
        return GENERIC_INSTRUCTION;
    };
    ARCHETYPE_INSTRUCTIONS
        .iter()
        .find(|(name, _)| *name == hint)
        .map(|(_, instruction)| *instruction)
        .unwrap_or(GENERIC_INSTRUCTION)
}

/// Compose the messages for a fresh generation turn.
///
/// System instruction and user text stay in separate roles so the model's
/// role semantics are preserved.
pub fn compose_generation(design_type: Option<&str>, user_text: &str) -> PromptMessages {
    let instruction = system_instruction(design_type);
    PromptMessages {
        system: format!("{instruction}\n\n{STRUCTURE_CONTRACT}"),
        user: user_text.to_string(),
    }
}

/// Compose the messages for a modification turn.
///
/// The prior specification is embedded in full, not as a diff, and the model
/// is asked for a complete replacement in the same shape. The receiving side
/// then only ever replaces and re-renders.
pub fn compose_modification(
    prior: &DesignSpecification,
    edit_text: &str,
) -> Result<PromptMessages, AtelierCoreError> {
    let serialized = serde_json::to_string(prior)
        .map_err(|err| AtelierCoreError::Validation(format!("failed to encode prior design: {err}")))?;
    let user = format!(
        "Modify the following design based on this request: \"{edit_text}\"\n\n\
         Original design: {serialized}\n\n\
         Return the complete modified design in the same JSON format."
    );
    Ok(compose_generation(Some(&prior.design_type), &user))
}
