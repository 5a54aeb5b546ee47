//! Configuration schema for Atelier.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Root config for the Atelier service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AtelierConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl AtelierConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> AtelierConfigBuilder {
        AtelierConfigBuilder::new()
    }

    /// Validate field-level constraints on the effective config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.max_tokens == 0 {
            return Err(ConfigError::InvalidField {
                path: "model.max_tokens".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::InvalidField {
                path: "model.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                path: "model.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for assembling an `AtelierConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct AtelierConfigBuilder {
    config: AtelierConfig,
}

impl AtelierConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: AtelierConfig::default(),
        }
    }

    /// Replace the server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the model configuration.
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Finalize and return the built `AtelierConfig`.
    pub fn build(self) -> AtelierConfig {
        self.config
    }
}

/// Listener configuration for the HTTP/WebSocket server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// External model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name under the provider.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// API key; prefer the `ATELIER_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Bound on model output size.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Fixed creativity setting for design generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout for model calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_model_name(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model_name() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}
