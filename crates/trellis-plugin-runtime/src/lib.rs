//! # Trellis Plugin Runtime
//!
//! Discovery and lookup of interceptors registered with
//! `trellis_plugin_api::export_interceptor!`.
//!
//! ## Features
//!
//! - **Scanner**: Turns link-time markers into live interceptors, once
//! - **Store**: Ordered interceptor lists per category
//! - **Registry**: Process-wide, idempotent, thread-safe loading and lookup
//! - **Configuration**: Disable interceptors by name from files or environment
//!
//! ## Example
//!
//! ```rust,no_run
//! use trellis_plugin_runtime::prelude::*;
//!
//! let registry = InterceptorRegistry::global();
//! registry.load_all();
//!
//! registry.enumerate_interceptor(InterceptorCategory::Log, |entry, _idx, stop| {
//!     if let Some(logger) = entry.instance().as_log() {
//!         *stop = logger.handle_native_log(LogLevel::Info, "engine started");
//!     }
//! });
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod config;
pub mod error;
pub mod legacy;
pub mod registry;
pub mod scanner;
pub mod store;

pub use config::{ConfigFormat, RegistryConfig};
pub use error::{RegistryError, Result};
pub use registry::{
    enumerate_interceptor, has_interceptor, interceptors, interceptors_of, load_all,
    InterceptorRegistry,
};
pub use scanner::{ScanReport, Scanner, SkipReason, SkippedInterceptor};
pub use store::{InterceptorStore, RegisteredInterceptor};

// Re-export interceptor API types for convenience
pub use trellis_plugin_api::{
    export_interceptor, InterceptorCategory, InterceptorInstance, InterceptorMarker, PluginError,
};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::config::RegistryConfig;
    pub use crate::error::{RegistryError, Result};
    pub use crate::registry::InterceptorRegistry;
    pub use crate::store::{InterceptorStore, RegisteredInterceptor};
    pub use trellis_plugin_api::prelude::*;
}
