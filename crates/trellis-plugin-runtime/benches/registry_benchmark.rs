// Benchmarks for interceptor lookup
//
// Run with: cargo bench --bench registry_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use trellis_plugin_api::testing::{MockEventTracker, MockLogInterceptor};
use trellis_plugin_api::{InterceptorCategory, InterceptorInstance, InterceptorMarker, PluginError};
use trellis_plugin_runtime::{InterceptorRegistry, Scanner};

fn create_tracker() -> Result<InterceptorInstance, PluginError> {
    Ok(InterceptorInstance::EventTrack(Arc::new(
        MockEventTracker::new(),
    )))
}

fn create_logger() -> Result<InterceptorInstance, PluginError> {
    Ok(InterceptorInstance::Log(Arc::new(MockLogInterceptor::new())))
}

static MARKERS: [InterceptorMarker; 4] = [
    InterceptorMarker::new("TrackerA", InterceptorCategory::EventTrack, create_tracker),
    InterceptorMarker::new("TrackerB", InterceptorCategory::EventTrack, create_tracker),
    InterceptorMarker::new("TrackerC", InterceptorCategory::EventTrack, create_tracker),
    InterceptorMarker::new("Console", InterceptorCategory::Log, create_logger),
];

fn benchmark_scan(c: &mut Criterion) {
    let scanner = Scanner::default();

    c.bench_function("scan_4_markers", |b| {
        b.iter(|| black_box(scanner.scan(black_box(&MARKERS))))
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let registry = InterceptorRegistry::new();
    registry.load_from(&MARKERS);

    c.bench_function("has_interceptor", |b| {
        b.iter(|| black_box(registry.has_interceptor(black_box(InterceptorCategory::EventTrack))))
    });

    c.bench_function("enumerate_event_trackers", |b| {
        b.iter(|| {
            let mut visited = 0usize;
            registry.enumerate_interceptor(InterceptorCategory::EventTrack, |entry, _, _| {
                visited += black_box(entry.name().len());
            });
            black_box(visited)
        })
    });

    c.bench_function("enumerate_stop_first", |b| {
        b.iter(|| {
            let mut visited = 0usize;
            registry.enumerate_interceptor(InterceptorCategory::EventTrack, |_, _, stop| {
                visited += 1;
                *stop = true;
            });
            black_box(visited)
        })
    });
}

criterion_group!(benches, benchmark_scan, benchmark_lookup);
criterion_main!(benches);
