//! # Trace Interceptors
//!
//! Interceptors that forward runtime activity to `tracing`.
//!
//! ## Interceptors
//!
//! - [`TracingLogger`]: native and JS log lines as tracing events
//! - [`TracingEventTracker`]: page lifecycle timings as structured events
//! - [`RequestStamp`]: tags outgoing page requests with the page URL
//!
//! Each one is registered with `export_interceptor!` and is picked up by the
//! registry scan as soon as this crate is linked.
//!
//! ## Configuration
//!
//! `RequestStamp` reads JSON from `TRELLIS_REQUEST_STAMP`:
//!
//! ```json
//! { "header": "x-trellis-page", "exclude_pages": ["app://debug/*"] }
//! ```

use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue};
use http::Request;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};
use trellis_plugin_api::prelude::*;
use trellis_plugin_api::export_interceptor;

/// Environment variable holding the [`StampConfig`] as JSON
pub const STAMP_CONFIG_ENV: &str = "TRELLIS_REQUEST_STAMP";

/// Names of the interceptors this crate registers
pub fn exported_names() -> &'static [&'static str] {
    &["TracingLogger", "TracingEventTracker", "RequestStamp"]
}

/// Log interceptor that re-emits lines through `tracing`
///
/// Lines below `min_level` are left to the runtime's default output.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    min_level: LogLevel,
}

impl TracingLogger {
    /// Consume lines at or above `min_level`
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn emit(&self, level: LogLevel, origin: &str, page: &str, message: &str) -> bool {
        if level < self.min_level {
            return false;
        }
        match level {
            LogLevel::Trace => trace!(origin = %origin, page = %page, "{message}"),
            LogLevel::Debug => debug!(origin = %origin, page = %page, "{message}"),
            LogLevel::Info => info!(origin = %origin, page = %page, "{message}"),
            LogLevel::Warn => warn!(origin = %origin, page = %page, "{message}"),
            LogLevel::Error => error!(origin = %origin, page = %page, "{message}"),
        }
        true
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LogLevel::Trace)
    }
}

impl Interceptor for TracingLogger {
    fn description(&self) -> &str {
        "forwards runtime logs to tracing"
    }
}

impl LogInterceptor for TracingLogger {
    fn handle_native_log(&self, level: LogLevel, message: &str) -> bool {
        self.emit(level, "native", "", message)
    }

    fn handle_js_log(&self, level: LogLevel, message: &str, page_url: &str) -> bool {
        self.emit(level, "js", page_url, message)
    }
}

export_interceptor!(Log => TracingLogger);

/// Event tracker that records page lifecycle events as tracing events
#[derive(Debug, Default)]
pub struct TracingEventTracker;

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

impl Interceptor for TracingEventTracker {
    fn description(&self) -> &str {
        "records page lifecycle events"
    }
}

impl EventTracker for TracingEventTracker {
    fn track_engine_initialization(&self, duration: Duration) {
        info!(duration_ms = millis(duration), "Engine initialized");
    }

    fn track_javascript_bundle(&self, size: u64, page_url: &str) {
        debug!(size, page = %page_url, "JavaScript bundle loaded");
    }

    fn track_page_render_completion(&self, duration: Duration, page_url: &str) {
        info!(duration_ms = millis(duration), page = %page_url, "Page rendered");
    }

    fn track_evaluation(&self, duration: Duration, page_url: &str) {
        debug!(duration_ms = millis(duration), page = %page_url, "Script evaluated");
    }

    fn track_performance(&self, sample: &PerformanceSample, page_url: &str) {
        info!(
            label = %sample.label,
            display = %sample.localizable_label,
            value = %sample.value,
            unit = %sample.unit,
            page = %page_url,
            "Performance sample"
        );
    }

    fn track_javascript_exception(&self, exception: &ExceptionModel, page_url: &str) {
        warn!(
            name = %exception.name,
            message = %exception.message,
            stack = exception.stack.as_deref().unwrap_or(""),
            page = %page_url,
            "JavaScript exception"
        );
    }

    fn track_page_view(&self, page_url: &str) {
        debug!(page = %page_url, "Page view");
    }

    fn track_page_success(&self, page_url: &str) {
        info!(page = %page_url, "Page loaded");
    }
}

export_interceptor!(EventTrack => TracingEventTracker);

/// [`RequestStamp`] configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampConfig {
    /// Header carrying the page URL
    #[serde(default = "default_header")]
    pub header: String,

    /// Header carrying the page namespace, when the page has one
    #[serde(default = "default_namespace_header")]
    pub namespace_header: String,

    /// Pages whose requests are left untouched; a trailing `*` matches a prefix
    #[serde(default)]
    pub exclude_pages: Vec<String>,
}

fn default_header() -> String {
    "x-trellis-page".to_string()
}

fn default_namespace_header() -> String {
    "x-trellis-namespace".to_string()
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            namespace_header: default_namespace_header(),
            exclude_pages: vec![],
        }
    }
}

/// Network interceptor that stamps requests with the issuing page
#[derive(Debug, Clone)]
pub struct RequestStamp {
    header: HeaderName,
    namespace_header: HeaderName,
    exclude_pages: Vec<String>,
}

impl RequestStamp {
    /// Build from configuration
    pub fn new(config: StampConfig) -> Result<Self, PluginError> {
        let parse = |name: &str| {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| PluginError::config(format!("Invalid header name '{name}': {e}")))
        };

        Ok(Self {
            header: parse(&config.header)?,
            namespace_header: parse(&config.namespace_header)?,
            exclude_pages: config.exclude_pages,
        })
    }

    /// Build from [`STAMP_CONFIG_ENV`], or defaults when it is unset
    pub fn from_env() -> Result<Self, PluginError> {
        let config = match std::env::var(STAMP_CONFIG_ENV) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                PluginError::config(format!("Invalid {STAMP_CONFIG_ENV}: {e}"))
            })?,
            Err(_) => StampConfig::default(),
        };
        Self::new(config)
    }

    fn should_exclude(&self, page_url: &str) -> bool {
        self.exclude_pages.iter().any(|exclude| match exclude.strip_suffix('*') {
            Some(prefix) => page_url.starts_with(prefix),
            None => page_url == exclude,
        })
    }
}

impl Interceptor for RequestStamp {
    fn description(&self) -> &str {
        "stamps requests with the issuing page"
    }
}

#[async_trait]
impl NetworkInterceptor for RequestStamp {
    async fn intercept_request(
        &self,
        req: &mut Request<Body>,
        ctx: &NetworkContext,
    ) -> Result<InterceptorAction, PluginError> {
        if self.should_exclude(&ctx.page_url) {
            return Ok(InterceptorAction::Continue);
        }

        match HeaderValue::from_str(&ctx.page_url) {
            Ok(value) => {
                req.headers_mut().insert(self.header.clone(), value);
            }
            Err(_) => {
                warn!(page = %ctx.page_url, "Page URL is not a valid header value, not stamping");
                return Ok(InterceptorAction::Continue);
            }
        }

        if let Some(namespace) = &ctx.namespace {
            if let Ok(value) = HeaderValue::from_str(namespace) {
                req.headers_mut().insert(self.namespace_header.clone(), value);
            }
        }

        trace!(
            page = %ctx.page_url,
            method = %req.method(),
            uri = %req.uri(),
            "Request stamped"
        );

        Ok(InterceptorAction::Continue)
    }
}

export_interceptor!(Network => RequestStamp, RequestStamp::from_env);
