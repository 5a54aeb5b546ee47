//! Config file discovery, parsing, and environment overrides.

use crate::{AtelierConfig, ConfigError};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Default config filename resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "atelier.json5";

/// Environment variable holding the model API key.
pub const ENV_API_KEY: &str = "ATELIER_API_KEY";
/// Environment variable overriding the model name.
pub const ENV_MODEL_NAME: &str = "ATELIER_MODEL";
/// Environment variable overriding the model base URL.
pub const ENV_BASE_URL: &str = "ATELIER_BASE_URL";

/// Load the effective config from an optional file path plus env overrides.
///
/// A missing file is not an error: defaults apply, and environment variables
/// are still layered on top.
pub fn load_config(path: Option<&Path>) -> Result<AtelierConfig, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut config = if path.exists() {
        load_config_file(path)?
    } else {
        debug!("config file missing, using defaults (path={})", path.display());
        AtelierConfig::default()
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Read and decode a single config file.
pub fn load_config_file(path: &Path) -> Result<AtelierConfig, ConfigError> {
    info!("loading config (path={})", path.display());
    let contents = fs::read_to_string(path)?;
    let value: Value = json5::from_str(&contents)?;
    Ok(serde_json::from_value(value)?)
}

/// Layer environment variables onto a loaded config.
fn apply_env_overrides(
    config: &mut AtelierConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(key) = lookup(ENV_API_KEY)
        && !key.trim().is_empty()
    {
        config.model.api_key = Some(key.trim().to_string());
    }
    if let Some(name) = lookup(ENV_MODEL_NAME)
        && !name.trim().is_empty()
    {
        config.model.name = name.trim().to_string();
    }
    if let Some(base_url) = lookup(ENV_BASE_URL)
        && !base_url.trim().is_empty()
    {
        config.model.base_url = base_url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_env_overrides, load_config_file};
    use crate::AtelierConfig;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_json5_file_with_comments() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("atelier.json5");
        fs::write(
            &path,
            r#"{
                // local overrides
                server: { port: 4100 },
                model: { name: "gpt-4o-mini" },
            }"#,
        )
        .expect("write");

        let config = load_config_file(&path).expect("load");
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.model.name, "gpt-4o-mini");
    }

    #[test]
    fn env_overrides_take_precedence_over_file_values() {
        let mut config = AtelierConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            super::ENV_API_KEY => Some("sk-test ".to_string()),
            super::ENV_MODEL_NAME => Some("gpt-4.1".to_string()),
            _ => None,
        });

        assert_eq!(config.model.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model.name, "gpt-4.1");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AtelierConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.model.api_key, None);
        assert_eq!(config.model.name, "gpt-4");
    }
}
