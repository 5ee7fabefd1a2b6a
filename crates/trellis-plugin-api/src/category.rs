//! Interceptor categories
//!
//! The category set is closed. Discriminants are part of the embedding
//! contract: new categories are appended, existing ones are never renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subsystem an interceptor serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum InterceptorCategory {
    /// Native and JS log handling
    Log = 0,
    /// HTTP request/response interception
    Network = 1,
    /// Remote image URL rewriting
    WebImage = 2,
    /// Exception reporting
    Reporter = 3,
    /// Page routing
    Router = 4,
    /// Image loading and decoding
    Image = 5,
    /// Performance and event tracking
    EventTrack = 6,
    /// JS bundle loading
    JsLoad = 7,
    /// JS to native call interception
    JsCaller = 8,
}

impl InterceptorCategory {
    /// Number of categories
    pub const COUNT: usize = 9;

    /// Every category in discriminant order
    pub const ALL: [InterceptorCategory; Self::COUNT] = [
        InterceptorCategory::Log,
        InterceptorCategory::Network,
        InterceptorCategory::WebImage,
        InterceptorCategory::Reporter,
        InterceptorCategory::Router,
        InterceptorCategory::Image,
        InterceptorCategory::EventTrack,
        InterceptorCategory::JsLoad,
        InterceptorCategory::JsCaller,
    ];

    /// Position of this category in [`InterceptorCategory::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable kebab-case name
    pub const fn as_str(self) -> &'static str {
        match self {
            InterceptorCategory::Log => "log",
            InterceptorCategory::Network => "network",
            InterceptorCategory::WebImage => "web-image",
            InterceptorCategory::Reporter => "reporter",
            InterceptorCategory::Router => "router",
            InterceptorCategory::Image => "image",
            InterceptorCategory::EventTrack => "event-track",
            InterceptorCategory::JsLoad => "js-load",
            InterceptorCategory::JsCaller => "js-caller",
        }
    }
}

impl fmt::Display for InterceptorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown interceptor category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for InterceptorCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
