//! Wire protocol types for Atelier requests, events, and the design schema.

mod model;
mod spec;

pub use model::{ModelError, ModelProvider, PromptMessages};
pub use spec::{Component, DesignSpecification, Layout};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a design specification.
pub type DesignId = Uuid;
/// Unique identifier for a client connection.
pub type ConnectionId = Uuid;

/// All requests a client can send over the real-time transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ClientRequest {
    /// Generate a new design from a free-text prompt.
    #[serde(rename_all = "camelCase")]
    GenerateDesign {
        prompt: String,
        #[serde(default)]
        design_type: Option<String>,
        #[serde(default)]
        session_id: Option<String>,
    },
    /// Derive a modified design from one already in history.
    #[serde(rename_all = "camelCase")]
    ModifyDesign {
        design_id: DesignId,
        prompt: String,
        modification: String,
    },
    /// Mark this connection as a design-tool plugin listener.
    #[serde(rename_all = "camelCase")]
    PluginConnect {
        #[serde(default)]
        plugin_name: Option<String>,
        #[serde(default)]
        plugin_version: Option<String>,
    },
    /// Fetch a design from history by id.
    #[serde(rename_all = "camelCase")]
    RequestDesign { design_id: DesignId },
}

/// All events the server emits over the real-time transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Generation progress indicator for the requesting client.
    #[serde(rename_all = "camelCase")]
    AssistantTyping { is_typing: bool },
    /// A new design was generated for this client.
    DesignGenerated {
        success: bool,
        design: DesignSpecification,
        message: String,
    },
    /// A modified design was produced for this client.
    DesignModified {
        success: bool,
        design: DesignSpecification,
        message: String,
    },
    /// A request failed; `message` is always user-safe.
    DesignError { success: bool, message: String },
    /// Acknowledgment for a plugin-connect request.
    PluginConnected { success: bool },
    /// Reply to a request-design lookup.
    DesignData { design: DesignSpecification },
    /// Fan-out notification to every other connection.
    PluginUpdate {
        update: PluginUpdateKind,
        design: DesignSpecification,
    },
}

impl ServerEvent {
    /// Build a user-safe error event.
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::DesignError {
            success: false,
            message: message.into(),
        }
    }

    /// Build a typing indicator event.
    pub fn typing(is_typing: bool) -> Self {
        ServerEvent::AssistantTyping { is_typing }
    }
}

/// Kind of design event carried by a `PluginUpdate` broadcast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PluginUpdateKind {
    /// A brand new design was generated.
    NewDesign,
    /// An existing design was modified.
    DesignModified,
}

#[cfg(test)]
mod tests {
    use super::{ClientRequest, PluginUpdateKind, ServerEvent};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn generate_request_uses_wire_field_names() {
        let request: ClientRequest = serde_json::from_value(json!({
            "type": "generate-design",
            "payload": {
                "prompt": "Create a modern login page",
                "designType": "login",
                "sessionId": "abc123",
            }
        }))
        .expect("decode");

        assert_eq!(
            request,
            ClientRequest::GenerateDesign {
                prompt: "Create a modern login page".to_string(),
                design_type: Some("login".to_string()),
                session_id: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn generate_request_hint_is_optional() {
        let request: ClientRequest = serde_json::from_value(json!({
            "type": "generate-design",
            "payload": { "prompt": "anything" }
        }))
        .expect("decode");

        match request {
            ClientRequest::GenerateDesign { design_type, .. } => assert_eq!(design_type, None),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn modify_request_round_trips() {
        let request = ClientRequest::ModifyDesign {
            design_id: Uuid::new_v4(),
            prompt: "make the button blue".to_string(),
            modification: "recolor".to_string(),
        };

        let value = serde_json::to_value(&request).expect("encode");
        assert_eq!(value["type"], json!("modify-design"));
        assert!(value["payload"]["designId"].is_string());

        let decoded: ClientRequest = serde_json::from_value(value).expect("decode");
        assert_eq!(decoded, request);
    }

    #[test]
    fn error_event_is_kebab_tagged_and_unsuccessful() {
        let value = serde_json::to_value(ServerEvent::error("please try again")).expect("encode");
        assert_eq!(value["type"], json!("design-error"));
        assert_eq!(value["payload"]["success"], json!(false));
        assert_eq!(value["payload"]["message"], json!("please try again"));
    }

    #[test]
    fn plugin_update_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(PluginUpdateKind::NewDesign).expect("encode"),
            json!("new-design")
        );
        assert_eq!(
            serde_json::to_value(PluginUpdateKind::DesignModified).expect("encode"),
            json!("design-modified")
        );
    }
}
