//! Router interceptor trait

use crate::interceptor::Interceptor;
use serde::{Deserialize, Serialize};

/// Navigation request issued by a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTarget {
    /// Destination URL
    pub url: String,

    /// Parameters passed to the destination page
    #[serde(default)]
    pub params: serde_json::Value,

    /// Whether the transition should animate
    #[serde(default = "default_animated")]
    pub animated: bool,
}

fn default_animated() -> bool {
    true
}

impl RouteTarget {
    /// Create a navigation request to `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: serde_json::Value::Null,
            animated: true,
        }
    }
}

/// Router interceptor
pub trait RouterInterceptor: Interceptor {
    /// Handle a navigation; `true` means the interceptor performed it
    fn handle_open(&self, target: &RouteTarget) -> bool;
}
