//! Design specification schema shared by the generator, store, and renderers.

use crate::DesignId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One generated or modified UI design.
///
/// Specifications are immutable once created: a modification produces a new
/// specification linked to its parent via `parent_id`, never an in-place edit.
/// Unknown top-level fields from the model are carried in `extra` so that
/// renderers can consume them without a schema change here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignSpecification {
    /// Unique identifier, assigned at creation by the generation service.
    pub id: DesignId,
    /// Design archetype (e.g. `login-screen`, `dashboard`); open set.
    #[serde(rename = "type", default)]
    pub design_type: String,
    /// Model-supplied title.
    #[serde(default)]
    pub title: String,
    /// Model-supplied description.
    #[serde(default)]
    pub description: String,
    /// Ordered UI elements; order is rendering order and must be preserved.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Canvas layout, defaulted when the model omits it.
    #[serde(default)]
    pub layout: Layout,
    /// Verbatim user text that produced this specification.
    #[serde(default)]
    pub prompt: String,
    /// Server-assigned creation time.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the specification this one was derived from.
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DesignId>,
    /// Free-text label of the edit applied when derived from a parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification: Option<String>,
    /// Human-readable rendering steps for the design-tool plugin.
    #[serde(
        rename = "figmaInstructions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub figma_instructions: Vec<String>,
    /// Unknown top-level fields, preserved end-to-end.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One UI element inside a design specification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Component {
    /// Identifier unique within the parent specification.
    #[serde(default)]
    pub id: String,
    /// Element kind (`button`, `input`, `card`, ...); open set.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Open bag of per-kind properties (text, style hints, position hints).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    /// Fields the model emitted outside `properties`, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canvas dimensions and background for a specification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Background color as a CSS color string.
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    800
}

fn default_background() -> String {
    "#ffffff".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Component, DesignSpecification, Layout};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn layout_defaults_apply_when_absent() {
        let layout: Layout = serde_json::from_value(json!({})).expect("layout");
        assert_eq!(layout.width, 1200);
        assert_eq!(layout.height, 800);
        assert_eq!(layout.background, "#ffffff");
    }

    #[test]
    fn specification_round_trips_with_empty_components_and_no_parent() {
        let spec = DesignSpecification {
            id: Uuid::new_v4(),
            design_type: "landing-page".to_string(),
            title: "Hero".to_string(),
            description: String::new(),
            components: Vec::new(),
            layout: Layout::default(),
            prompt: "a landing page".to_string(),
            timestamp: chrono::Utc::now(),
            parent_id: None,
            modification: None,
            figma_instructions: Vec::new(),
            extra: serde_json::Map::new(),
        };

        let encoded = serde_json::to_string(&spec).expect("encode");
        let decoded: DesignSpecification = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, spec);
    }

    #[test]
    fn specification_preserves_unknown_top_level_fields() {
        let value = json!({
            "id": Uuid::new_v4(),
            "type": "dashboard",
            "timestamp": chrono::Utc::now(),
            "theme": "dark",
            "gridSize": 8,
        });

        let spec: DesignSpecification = serde_json::from_value(value).expect("decode");
        assert_eq!(spec.extra.get("theme"), Some(&json!("dark")));
        assert_eq!(spec.extra.get("gridSize"), Some(&json!(8)));

        let encoded = serde_json::to_value(&spec).expect("encode");
        assert_eq!(encoded.get("theme"), Some(&json!("dark")));
        assert_eq!(encoded.get("gridSize"), Some(&json!(8)));
    }

    #[test]
    fn component_keeps_loose_fields_outside_properties() {
        let value = json!({
            "id": "logo-1",
            "type": "logo",
            "position": "top-center",
            "size": "medium",
        });

        let component: Component = serde_json::from_value(value.clone()).expect("decode");
        assert_eq!(component.kind, "logo");
        assert_eq!(component.extra.get("position"), Some(&json!("top-center")));
        assert_eq!(serde_json::to_value(&component).expect("encode"), value);
    }
}
