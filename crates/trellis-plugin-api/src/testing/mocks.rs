//! Mock implementations for testing

use crate::interceptor::Interceptor;
use crate::log::{LogInterceptor, LogLevel};
use crate::network::{Body, InterceptorAction, NetworkContext, NetworkInterceptor};
use crate::track::{EventTracker, ExceptionModel, PerformanceSample};
use crate::PluginError;
use async_trait::async_trait;
use http::Request;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// One call received by a [`MockEventTracker`]
#[derive(Debug, Clone, PartialEq)]
pub enum TrackCall {
    /// `track_engine_initialization`
    EngineInitialization(Duration),
    /// `track_javascript_bundle`
    JavaScriptBundle {
        /// Bundle size
        size: u64,
        /// Page
        page_url: String,
    },
    /// `track_page_render_completion`
    PageRenderCompletion {
        /// Render time
        duration: Duration,
        /// Page
        page_url: String,
    },
    /// `track_evaluation`
    Evaluation {
        /// Evaluation time
        duration: Duration,
        /// Page
        page_url: String,
    },
    /// `track_performance`
    Performance {
        /// Sample
        sample: PerformanceSample,
        /// Page
        page_url: String,
    },
    /// `track_javascript_exception`
    JavaScriptException {
        /// Exception
        exception: ExceptionModel,
        /// Page
        page_url: String,
    },
    /// `track_page_view`
    PageView(String),
    /// `track_page_success`
    PageSuccess(String),
}

/// Event tracker that records every call
#[derive(Debug, Clone, Default)]
pub struct MockEventTracker {
    calls: Arc<Mutex<Vec<TrackCall>>>,
}

impl MockEventTracker {
    /// Create a new mock tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<TrackCall> {
        self.calls.lock().clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: TrackCall) {
        self.calls.lock().push(call);
    }
}

impl Interceptor for MockEventTracker {
    fn description(&self) -> &str {
        "mock event tracker"
    }
}

impl EventTracker for MockEventTracker {
    fn track_engine_initialization(&self, duration: Duration) {
        self.record(TrackCall::EngineInitialization(duration));
    }

    fn track_javascript_bundle(&self, size: u64, page_url: &str) {
        self.record(TrackCall::JavaScriptBundle {
            size,
            page_url: page_url.to_string(),
        });
    }

    fn track_page_render_completion(&self, duration: Duration, page_url: &str) {
        self.record(TrackCall::PageRenderCompletion {
            duration,
            page_url: page_url.to_string(),
        });
    }

    fn track_evaluation(&self, duration: Duration, page_url: &str) {
        self.record(TrackCall::Evaluation {
            duration,
            page_url: page_url.to_string(),
        });
    }

    fn track_performance(&self, sample: &PerformanceSample, page_url: &str) {
        self.record(TrackCall::Performance {
            sample: sample.clone(),
            page_url: page_url.to_string(),
        });
    }

    fn track_javascript_exception(&self, exception: &ExceptionModel, page_url: &str) {
        self.record(TrackCall::JavaScriptException {
            exception: exception.clone(),
            page_url: page_url.to_string(),
        });
    }

    fn track_page_view(&self, page_url: &str) {
        self.record(TrackCall::PageView(page_url.to_string()));
    }

    fn track_page_success(&self, page_url: &str) {
        self.record(TrackCall::PageSuccess(page_url.to_string()));
    }
}

/// Log interceptor that keeps every line it sees
#[derive(Debug, Clone, Default)]
pub struct MockLogInterceptor {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
    consume: bool,
}

impl MockLogInterceptor {
    /// Create a mock that lets lines fall through to default output
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that consumes every line
    pub fn consuming() -> Self {
        Self {
            consume: true,
            ..Self::default()
        }
    }

    /// Lines received so far
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }
}

impl Interceptor for MockLogInterceptor {
    fn description(&self) -> &str {
        "mock log interceptor"
    }
}

impl LogInterceptor for MockLogInterceptor {
    fn handle_native_log(&self, level: LogLevel, message: &str) -> bool {
        self.lines.lock().push((level, message.to_string()));
        self.consume
    }
}

#[derive(Debug, Clone)]
enum NetworkActionType {
    Continue,
    Abort,
}

/// Network interceptor that counts requests
#[derive(Debug, Clone)]
pub struct MockNetworkInterceptor {
    action: NetworkActionType,
    request_calls: Arc<Mutex<usize>>,
}

impl MockNetworkInterceptor {
    /// Create a new mock interceptor that continues
    pub fn new() -> Self {
        Self {
            action: NetworkActionType::Continue,
            request_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Set request action to abort
    pub fn abort_requests(mut self) -> Self {
        self.action = NetworkActionType::Abort;
        self
    }

    /// Get number of request intercept calls
    pub fn request_call_count(&self) -> usize {
        *self.request_calls.lock()
    }
}

impl Default for MockNetworkInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for MockNetworkInterceptor {
    fn description(&self) -> &str {
        "mock network interceptor"
    }
}

#[async_trait]
impl NetworkInterceptor for MockNetworkInterceptor {
    async fn intercept_request(
        &self,
        _req: &mut Request<Body>,
        _ctx: &NetworkContext,
    ) -> Result<InterceptorAction, PluginError> {
        *self.request_calls.lock() += 1;

        match self.action {
            NetworkActionType::Continue => Ok(InterceptorAction::Continue),
            NetworkActionType::Abort => {
                Ok(InterceptorAction::Abort(PluginError::network("Aborted")))
            }
        }
    }
}
