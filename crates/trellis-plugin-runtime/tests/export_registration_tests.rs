//! Integration tests for link-time interceptor registration

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use trellis_plugin_runtime::prelude::*;
use trellis_plugin_runtime::{export_interceptor, ScanReport, SkipReason};

#[derive(Debug, Default)]
struct PageViewCounter {
    views: AtomicUsize,
}

impl Interceptor for PageViewCounter {
    fn description(&self) -> &str {
        "page view counter"
    }
}

impl EventTracker for PageViewCounter {
    fn track_engine_initialization(&self, _duration: Duration) {}
    fn track_javascript_bundle(&self, _size: u64, _page_url: &str) {}
    fn track_page_render_completion(&self, _duration: Duration, _page_url: &str) {}
    fn track_evaluation(&self, _duration: Duration, _page_url: &str) {}
    fn track_performance(&self, _sample: &PerformanceSample, _page_url: &str) {}
    fn track_javascript_exception(&self, _exception: &ExceptionModel, _page_url: &str) {}

    fn track_page_view(&self, _page_url: &str) {
        self.views.fetch_add(1, Ordering::SeqCst);
    }

    fn track_page_success(&self, _page_url: &str) {}
}

export_interceptor!(EventTrack => PageViewCounter);

#[derive(Debug, Default)]
struct SilentLogger;

impl Interceptor for SilentLogger {}

impl LogInterceptor for SilentLogger {
    fn handle_native_log(&self, _level: LogLevel, _message: &str) -> bool {
        true
    }
}

export_interceptor!(Log => SilentLogger);

#[derive(Debug)]
struct DeepLinkRouter;

impl Interceptor for DeepLinkRouter {}

impl RouterInterceptor for DeepLinkRouter {
    fn handle_open(&self, target: &RouteTarget) -> bool {
        target.url.starts_with("app://")
    }
}

fn build_router() -> std::result::Result<DeepLinkRouter, PluginError> {
    Err(PluginError::config("deep link scheme not configured"))
}

export_interceptor!(Router => DeepLinkRouter, build_router);

fn names(store: &InterceptorStore, category: InterceptorCategory) -> Vec<&'static str> {
    store.get(category).iter().map(|e| e.name()).collect()
}

fn skipped<'a>(report: &'a ScanReport, name: &str) -> Option<&'a SkipReason> {
    report
        .skipped
        .iter()
        .find(|s| s.name == name)
        .map(|s| &s.reason)
}

#[test]
fn test_exported_types_are_discovered() {
    let registry = InterceptorRegistry::new();
    let store = registry.load_all();

    assert_eq!(
        names(store, InterceptorCategory::EventTrack),
        vec!["PageViewCounter"]
    );
    assert_eq!(names(store, InterceptorCategory::Log), vec!["SilentLogger"]);
    assert!(!registry.has_interceptor(InterceptorCategory::Router));
}

#[test]
fn test_failing_factory_is_skipped() {
    let registry = InterceptorRegistry::new();
    registry.load_all();

    let report = registry.report().unwrap();
    assert!(matches!(
        skipped(report, "DeepLinkRouter"),
        Some(SkipReason::ResolutionFailed { .. })
    ));
    assert!(report.loaded.contains(&("SilentLogger", InterceptorCategory::Log)));
}

#[test]
fn test_disabled_interceptor_is_not_instantiated() {
    let registry =
        InterceptorRegistry::with_config(RegistryConfig::default().disable("SilentLogger"));
    registry.load_all();

    assert!(!registry.has_interceptor(InterceptorCategory::Log));
    assert_eq!(
        skipped(registry.report().unwrap(), "SilentLogger"),
        Some(&SkipReason::Disabled)
    );
}

#[test]
fn test_separate_registries_hold_separate_instances() {
    let first = InterceptorRegistry::new();
    let second = InterceptorRegistry::new();

    let tracker = |registry: &InterceptorRegistry| {
        registry.load_all();
        registry.interceptors_of(InterceptorCategory::EventTrack)[0]
            .instance()
            .expect_event_tracker()
            .unwrap()
            .clone()
    };

    let a = tracker(&first);
    let b = tracker(&second);
    a.track_page_view("app://home");

    assert!(!std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn test_global_registry_dispatch() {
    let store = trellis_plugin_runtime::load_all();
    let again = trellis_plugin_runtime::load_all();
    assert!(std::ptr::eq(store, again));

    assert!(trellis_plugin_runtime::has_interceptor(
        InterceptorCategory::EventTrack
    ));

    let mut visited = 0;
    trellis_plugin_runtime::enumerate_interceptor(
        InterceptorCategory::EventTrack,
        |entry, idx, stop| {
            assert_eq!(idx, visited);
            let tracker = entry.instance().expect_event_tracker().unwrap();
            tracker.track_page_view("app://settings");
            visited += 1;
            *stop = true;
        },
    );
    assert_eq!(visited, 1);
}

#[test]
fn test_capability_mismatch_at_call_site() {
    let registry = InterceptorRegistry::new();
    registry.load_all();

    let logger = &registry.interceptors_of(InterceptorCategory::Log)[0];
    let err = logger.instance().expect_network().unwrap_err();
    assert!(matches!(
        err,
        PluginError::CapabilityMismatch {
            expected: InterceptorCategory::Network,
            actual: InterceptorCategory::Log,
            ..
        }
    ));
}

#[test]
#[allow(deprecated)]
fn test_legacy_surface_forwards_to_global_registry() {
    use trellis_plugin_runtime::legacy;

    legacy::load_export_interceptor();

    assert!(legacy::has_interceptor(InterceptorCategory::Log));
    assert!(legacy::interceptor(InterceptorCategory::Router).is_none());
    assert_eq!(
        legacy::interceptor(InterceptorCategory::Log).map(<[_]>::len),
        Some(1)
    );
    assert!(legacy::all_interceptors().is_some_and(|all| all.len() >= 2));

    let mut names = Vec::new();
    legacy::enumerate_interceptor(InterceptorCategory::Log, |entry, _, _| {
        names.push(entry.name())
    });
    assert_eq!(names, vec!["SilentLogger"]);
}
