//! Fan-out of tracking events to event-track interceptors

use crate::clock::Timespec;
use std::sync::Arc;
use tracing::{debug, warn};
use trellis_plugin_api::{EventTracker, ExceptionModel, InterceptorCategory, PerformanceSample};
use trellis_plugin_runtime::InterceptorRegistry;

/// Forwards tracking calls to every event tracker, in registry order
///
/// The tracker list is captured at construction. Build the dispatcher after
/// the registry has been loaded.
#[derive(Debug, Clone, Default)]
pub struct TrackingDispatcher {
    trackers: Vec<Arc<dyn EventTracker>>,
}

impl TrackingDispatcher {
    /// Dispatch to an explicit list of trackers
    pub fn new(trackers: Vec<Arc<dyn EventTracker>>) -> Self {
        Self { trackers }
    }

    /// Dispatch to the event trackers of `registry`
    pub fn from_registry(registry: &InterceptorRegistry) -> Self {
        let mut trackers = Vec::new();
        registry.enumerate_interceptor(InterceptorCategory::EventTrack, |entry, _, _| {
            if let Some(tracker) = entry.instance().as_event_tracker() {
                trackers.push(Arc::clone(tracker));
            }
        });
        debug!(trackers = trackers.len(), "Tracking dispatcher created");
        Self { trackers }
    }

    /// Dispatch to the event trackers of the process-wide registry
    pub fn global() -> Self {
        Self::from_registry(InterceptorRegistry::global())
    }

    /// Number of trackers
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Whether there is nobody to dispatch to
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Engine finished initializing after `elapsed`
    pub fn engine_initialized(&self, elapsed: Timespec) {
        let duration = checked_duration("engine_initialization", elapsed);
        debug!(elapsed_ms = elapsed.as_millis_f64(), "Engine initialized");
        for tracker in &self.trackers {
            tracker.track_engine_initialization(duration);
        }
    }

    /// A JavaScript bundle of `size` bytes was loaded for `page_url`
    pub fn bundle_loaded(&self, size: u64, page_url: &str) {
        debug!(size, page = %page_url, "JavaScript bundle loaded");
        for tracker in &self.trackers {
            tracker.track_javascript_bundle(size, page_url);
        }
    }

    /// `page_url` finished rendering after `elapsed`
    pub fn page_rendered(&self, elapsed: Timespec, page_url: &str) {
        let duration = checked_duration("page_render_completion", elapsed);
        debug!(elapsed_ms = elapsed.as_millis_f64(), page = %page_url, "Page rendered");
        for tracker in &self.trackers {
            tracker.track_page_render_completion(duration, page_url);
        }
    }

    /// Script evaluation for `page_url` took `elapsed`
    pub fn evaluated(&self, elapsed: Timespec, page_url: &str) {
        let duration = checked_duration("evaluation", elapsed);
        debug!(elapsed_ms = elapsed.as_millis_f64(), page = %page_url, "Evaluation finished");
        for tracker in &self.trackers {
            tracker.track_evaluation(duration, page_url);
        }
    }

    /// Report a labelled performance sample
    pub fn performance(&self, sample: &PerformanceSample, page_url: &str) {
        debug!(
            label = %sample.label,
            value = %sample.value,
            unit = %sample.unit,
            page = %page_url,
            "Performance sample"
        );
        for tracker in &self.trackers {
            tracker.track_performance(sample, page_url);
        }
    }

    /// Report a timing as a performance sample in milliseconds
    pub fn performance_timing(&self, label: &str, elapsed: Timespec, page_url: &str) {
        let millis = checked_duration(label, elapsed).as_secs_f64() * 1_000.0;
        self.performance(&PerformanceSample::new(label, millis, "ms"), page_url);
    }

    /// A JavaScript exception escaped on `page_url`
    pub fn exception(&self, exception: &ExceptionModel, page_url: &str) {
        debug!(exception = %exception, page = %page_url, "JavaScript exception");
        for tracker in &self.trackers {
            tracker.track_javascript_exception(exception, page_url);
        }
    }

    /// `page_url` was viewed
    pub fn page_view(&self, page_url: &str) {
        debug!(page = %page_url, "Page view");
        for tracker in &self.trackers {
            tracker.track_page_view(page_url);
        }
    }

    /// `page_url` loaded successfully
    pub fn page_success(&self, page_url: &str) {
        debug!(page = %page_url, "Page success");
        for tracker in &self.trackers {
            tracker.track_page_success(page_url);
        }
    }
}

fn checked_duration(event: &str, elapsed: Timespec) -> std::time::Duration {
    if elapsed.is_negative() {
        warn!(event = %event, elapsed = %elapsed, "Negative duration clamped to zero");
    }
    elapsed.as_duration()
}
