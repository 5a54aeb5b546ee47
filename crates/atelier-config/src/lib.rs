//! Configuration models and loading for the Atelier service.
//!
//! This crate owns the config schema, validation, and the file/env layering
//! used by the server binary.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Config file loading and environment override helpers.
pub use loader::{DEFAULT_CONFIG_FILE, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL_NAME, load_config};
/// Configuration schema models.
pub use model::*;
