//! Layered configuration: built-in defaults, an optional YAML file, then
//! `RELMOVE_*` environment variables.
//!
//! Nested keys use a double underscore (`RELMOVE_VAULT__NAME`); list keys
//! take comma separated values (`RELMOVE_EXCLUDED_PATHS=.git,.trash`).

use config::{Config, Environment, File, FileFormat};
use relmove_core::prelude::*;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RELMOVE";

/// Load the configuration, layering `path` and the environment over the defaults
pub fn load_config(path: Option<&Path>) -> Result<RelmoveConfig> {
    load_layers(path, true)
}

fn load_layers(path: Option<&Path>, with_env: bool) -> Result<RelmoveConfig> {
    let defaults = Config::try_from(&RelmoveConfig::default())
        .map_err(|e| Error::config_error(format!("Invalid defaults: {}", e)))?;

    let mut builder = Config::builder().add_source(defaults);

    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
    }

    if with_env {
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("excluded_paths")
                .with_list_parse_key("markdown_extensions"),
        );
    }

    let config: RelmoveConfig = builder
        .build()
        .and_then(|layered| layered.try_deserialize())
        .map_err(|e| Error::config_error(format!("Failed to load configuration: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Expand `~` and environment variables, then make the path absolute
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::invalid_path("Path contains invalid UTF-8"))?;

    let expanded = shellexpand::full(path_str)
        .map_err(|e| Error::invalid_path(format!("Failed to expand path: {}", e)))?;
    let expanded_path = PathBuf::from(expanded.as_ref());

    if expanded_path.exists() {
        expanded_path
            .canonicalize()
            .map_err(|e| Error::invalid_path(format!("Failed to resolve path: {}", e)))
    } else if expanded_path.is_absolute() {
        Ok(expanded_path)
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded_path))
            .map_err(|e| Error::invalid_path(format!("Failed to get current directory: {}", e)))
    }
}

/// Point the configuration at `vault_path`, keeping a configured name
pub fn with_vault(mut config: RelmoveConfig, vault_path: &Path) -> Result<RelmoveConfig> {
    let path = expand_path(vault_path)?;
    let name = config
        .vault
        .as_ref()
        .map(|v| v.name.clone())
        .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "vault".to_string());

    config.vault = Some(VaultConfig::builder(name, path).build()?);
    Ok(config)
}
