//! Interceptor error types

use crate::category::InterceptorCategory;
use std::fmt;

/// Interceptor error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Interceptor could not be constructed from its registration
    #[error("Failed to resolve interceptor '{name}': {message}")]
    Resolution {
        /// Registered interceptor name
        name: String,
        /// Failure detail
        message: String,
    },

    /// Interceptor was used through a capability it does not provide
    #[error("Interceptor '{interceptor}' is a {actual} interceptor, not {expected}")]
    CapabilityMismatch {
        /// Interceptor name or description
        interceptor: String,
        /// Capability the caller asked for
        expected: InterceptorCategory,
        /// Capability the instance actually provides
        actual: InterceptorCategory,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Runtime error raised by an interceptor
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    /// Network interception error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for interceptor operations
pub type Result<T> = std::result::Result<T, PluginError>;

impl PluginError {
    /// Create a new resolution error
    pub fn resolution(name: impl fmt::Display, msg: impl fmt::Display) -> Self {
        Self::Resolution {
            name: name.to_string(),
            message: msg.to_string(),
        }
    }

    /// Create a new capability mismatch error
    pub fn capability_mismatch(
        interceptor: impl fmt::Display,
        expected: InterceptorCategory,
        actual: InterceptorCategory,
    ) -> Self {
        Self::CapabilityMismatch {
            interceptor: interceptor.to_string(),
            expected,
            actual,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }

    /// Create a new runtime error
    pub fn runtime(msg: impl fmt::Display) -> Self {
        Self::RuntimeError(msg.to_string())
    }

    /// Create a new network error
    pub fn network(msg: impl fmt::Display) -> Self {
        Self::NetworkError(msg.to_string())
    }
}
