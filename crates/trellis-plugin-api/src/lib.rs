//! # Trellis Plugin API
//!
//! This crate provides the SDK for writing interceptors for the Trellis
//! hybrid runtime.
//!
//! ## Interceptor Categories
//!
//! - **Log**: Native and JS log handling
//! - **Network**: HTTP request/response interception
//! - **Web Image / Image**: URL rewriting and custom image loading
//! - **Reporter**: Exception reporting
//! - **Router**: Page navigation
//! - **Event Track**: Performance and page tracking
//! - **JS Load / JS Caller**: Bundle loading and JS to native calls
//!
//! ## Example
//!
//! ```rust,ignore
//! use trellis_plugin_api::prelude::*;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default)]
//! struct StdoutTracker;
//!
//! impl Interceptor for StdoutTracker {}
//!
//! impl EventTracker for StdoutTracker {
//!     fn track_engine_initialization(&self, duration: Duration) {
//!         println!("engine up in {duration:?}");
//!     }
//!     // ...remaining tracking hooks
//! }
//!
//! trellis_plugin_api::export_interceptor!(EventTrack => StdoutTracker);
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod category;
pub mod error;
pub mod image;
pub mod interceptor;
pub mod js;
pub mod log;
pub mod marker;
pub mod network;
pub mod reporter;
pub mod router;
pub mod track;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used types
pub use category::{InterceptorCategory, UnknownCategory};
pub use error::PluginError;
pub use image::{ImageInterceptor, WebImageInterceptor};
pub use interceptor::{Interceptor, InterceptorInstance};
pub use js::{JsCall, JsCallerInterceptor, JsLoadInterceptor};
pub use log::{LogInterceptor, LogLevel};
pub use marker::{registered_markers, InterceptorFactory, InterceptorMarker};
pub use network::{Body, InterceptorAction, NetworkContext, NetworkInterceptor};
pub use reporter::ReporterInterceptor;
pub use router::{RouteTarget, RouterInterceptor};
pub use track::{EventTracker, ExceptionModel, PerformanceSample, PerformanceValue};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::category::InterceptorCategory;
    pub use crate::error::PluginError;
    pub use crate::image::{ImageInterceptor, WebImageInterceptor};
    pub use crate::interceptor::{Interceptor, InterceptorInstance};
    pub use crate::js::{JsCall, JsCallerInterceptor, JsLoadInterceptor};
    pub use crate::log::{LogInterceptor, LogLevel};
    pub use crate::network::{Body, InterceptorAction, NetworkContext, NetworkInterceptor};
    pub use crate::reporter::ReporterInterceptor;
    pub use crate::router::{RouteTarget, RouterInterceptor};
    pub use crate::track::{EventTracker, ExceptionModel, PerformanceSample, PerformanceValue};
    pub use async_trait::async_trait;
}
