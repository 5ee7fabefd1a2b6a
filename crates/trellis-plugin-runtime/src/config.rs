//! Registry configuration
//!
//! Configuration can come from YAML, TOML or JSON files and is overridden by
//! environment variables:
//!
//! - `TRELLIS_REGISTRY_CONFIG`: path of a configuration file
//! - `TRELLIS_DISABLED_INTERCEPTORS`: comma separated names to skip

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Environment variable naming a configuration file
pub const CONFIG_PATH_ENV: &str = "TRELLIS_REGISTRY_CONFIG";

/// Environment variable listing disabled interceptors
pub const DISABLED_ENV: &str = "TRELLIS_DISABLED_INTERCEPTORS";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format
    Yaml,
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| RegistryError::config("Unable to detect config format"))?;

        match ext {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(RegistryError::config(format!(
                "Unsupported config format: {ext}"
            ))),
        }
    }
}

/// Scanner and registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registered names that must not be instantiated
    #[serde(default)]
    pub disabled: BTreeSet<String>,

    /// Log category mismatches as warnings instead of debug output
    #[serde(default = "default_strict_categories")]
    pub strict_categories: bool,
}

fn default_strict_categories() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            disabled: BTreeSet::new(),
            strict_categories: true,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let format = ConfigFormat::from_path(path)?;
        Self::from_str_with_format(&content, format)
    }

    /// Load configuration from a string
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::load(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Merge environment overrides into this configuration
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(disabled) = lookup(DISABLED_ENV) {
            self.disabled.extend(
                disabled
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from),
            );
        }
    }

    /// Disable an interceptor by registered name
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.disabled.insert(name.into());
        self
    }

    /// Whether `name` is disabled
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }
}
