//! Registry error types

use std::fmt;
use trellis_plugin_api::PluginError;

/// Registry error type
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Interceptor error
    #[error("Plugin error: {0}")]
    PluginError(#[from] PluginError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Create a new config error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RegistryError::config("bad format");
        assert!(matches!(err, RegistryError::ConfigError(_)));

        let err: RegistryError = PluginError::runtime("boom").into();
        assert!(matches!(err, RegistryError::PluginError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = RegistryError::ConfigError("unsupported format: ini".to_string());
        assert_eq!(err.to_string(), "Configuration error: unsupported format: ini");
    }
}
