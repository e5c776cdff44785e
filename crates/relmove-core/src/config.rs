//! Configuration types for relmove.
//!
//! Follows a builder pattern for the vault configuration with validation.
//! The binary layers defaults, a YAML file and `RELMOVE_*` environment
//! variables into a [`RelmoveConfig`].

use crate::error::{Error, Result};
use crate::models::MoveOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Configuration for the vault being worked on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Display name for logs
    pub name: String,
    /// Path to the vault directory
    pub path: PathBuf,
}

impl VaultConfig {
    /// Create a new vault config with builder
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> VaultConfigBuilder {
        VaultConfigBuilder::new(name, path)
    }

    /// Validate the vault configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config_error("Vault name cannot be empty"));
        }

        if !self.path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.path.display()
            )));
        }

        if !self.path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    name: String,
    path: PathBuf,
}

impl VaultConfigBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build and validate
    pub fn build(self) -> Result<VaultConfig> {
        let config = VaultConfig {
            name: self.name,
            path: self.path,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Global relmove configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelmoveConfig {
    /// Vault to operate on (may also come from the command line)
    pub vault: Option<VaultConfig>,

    // Scanning
    pub excluded_paths: HashSet<String>,
    pub markdown_extensions: HashSet<String>,

    // Move policy
    pub skip_file_when_exist: bool,
    pub include_inlinks: bool,

    // Presentation
    pub language: String,
    pub log_level: String,
}

impl Default for RelmoveConfig {
    fn default() -> Self {
        Self {
            vault: None,
            excluded_paths: [".obsidian", ".git", ".trash", ".DS_Store", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            markdown_extensions: ["md"].iter().map(|s| s.to_string()).collect(),
            skip_file_when_exist: true,
            include_inlinks: true,
            language: "en".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RelmoveConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(vault) = &self.vault {
            vault.validate()?;
        }

        if self.markdown_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one markdown extension must be configured",
            ));
        }

        if self.markdown_extensions.iter().any(|ext| ext.starts_with('.')) {
            return Err(Error::config_error(
                "Markdown extensions are written without the leading dot",
            ));
        }

        Ok(())
    }

    /// Get vault config
    pub fn vault(&self) -> Result<&VaultConfig> {
        self.vault
            .as_ref()
            .ok_or_else(|| Error::config_error("No vault configured"))
    }

    /// Move options implied by this configuration
    pub fn move_options(&self) -> MoveOptions {
        MoveOptions::new()
            .skip_file_when_exist(self.skip_file_when_exist)
            .include_inlinks(self.include_inlinks)
    }

    /// Whether a path segment is excluded from scanning
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_paths.contains(name)
    }

    /// Whether an extension (without dot) is parsed for links
    pub fn is_markdown_extension(&self, extension: &str) -> bool {
        self.markdown_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vault_config_builder() {
        let temp = TempDir::new().unwrap();
        let vault = VaultConfig::builder("main", temp.path()).build();

        assert!(vault.is_ok());
        let v = vault.unwrap();
        assert_eq!(v.name, "main");
        assert_eq!(v.path, temp.path());
    }

    #[test]
    fn test_vault_config_rejects_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(VaultConfig::builder("main", missing).build().is_err());
        assert!(VaultConfig::builder("", temp.path()).build().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = RelmoveConfig::new();
        assert!(config.validate().is_ok());
        assert!(config.is_excluded(".obsidian"));
        assert!(config.is_markdown_extension("MD"));
        assert!(config.vault().is_err());

        let opts = config.move_options();
        assert!(opts.skip_file_when_exist);
        assert!(opts.include_inlinks);
    }

    #[test]
    fn test_dotted_extension_rejected() {
        let mut config = RelmoveConfig::new();
        config.markdown_extensions.insert(".markdown".to_string());
        assert!(config.validate().is_err());
    }
}
