//! Interceptor registry
//!
//! The registry scans markers at most once and then serves read-only
//! queries. Queries never trigger a scan; before loading they return empty
//! results.

use crate::config::RegistryConfig;
use crate::scanner::{ScanReport, Scanner};
use crate::store::{InterceptorStore, RegisteredInterceptor};
use once_cell::sync::{Lazy, OnceCell};
use tracing::warn;
use trellis_plugin_api::{registered_markers, InterceptorCategory, InterceptorMarker};

static GLOBAL: Lazy<InterceptorRegistry> = Lazy::new(|| {
    let config = RegistryConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "Invalid registry configuration, using defaults");
        RegistryConfig::default()
    });
    InterceptorRegistry::with_config(config)
});

#[derive(Debug)]
struct LoadedState {
    store: InterceptorStore,
    report: ScanReport,
}

/// Interceptor registry
///
/// Concurrent loads run the scan exactly once; every other caller waits for
/// it and then observes the fully populated store.
#[derive(Debug, Default)]
pub struct InterceptorRegistry {
    scanner: Scanner,
    state: OnceCell<LoadedState>,
}

impl InterceptorRegistry {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            scanner: Scanner::new(config),
            state: OnceCell::new(),
        }
    }

    /// Process-wide registry, configured from the environment
    pub fn global() -> &'static InterceptorRegistry {
        &GLOBAL
    }

    /// Scan every linked marker, once
    pub fn load_all(&self) -> &InterceptorStore {
        self.load_from(registered_markers())
    }

    /// Scan an explicit marker source, once
    ///
    /// Whichever load runs first populates the registry; later calls return
    /// the existing store and ignore their markers.
    pub fn load_from<'a, I>(&self, markers: I) -> &InterceptorStore
    where
        I: IntoIterator<Item = &'a InterceptorMarker>,
    {
        let state = self.state.get_or_init(|| {
            let (store, report) = self.scanner.scan(markers);
            LoadedState { store, report }
        });
        &state.store
    }

    /// Whether a scan has completed
    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    /// Populated store, if loaded
    pub fn store(&self) -> Option<&InterceptorStore> {
        self.state.get().map(|s| &s.store)
    }

    /// Report of the scan, if loaded
    pub fn report(&self) -> Option<&ScanReport> {
        self.state.get().map(|s| &s.report)
    }

    /// Configuration used for scanning
    pub fn config(&self) -> &RegistryConfig {
        self.scanner.config()
    }

    /// Every interceptor across categories, empty before loading
    pub fn interceptors(&self) -> Vec<&RegisteredInterceptor> {
        self.store().map(InterceptorStore::all).unwrap_or_default()
    }

    /// Interceptors of one category in registration order
    pub fn interceptors_of(&self, category: InterceptorCategory) -> &[RegisteredInterceptor] {
        match self.store() {
            Some(store) => store.get(category),
            None => &[],
        }
    }

    /// Whether `category` has at least one interceptor
    pub fn has_interceptor(&self, category: InterceptorCategory) -> bool {
        self.store().is_some_and(|store| store.has(category))
    }

    /// Visit the interceptors of `category`; see [`InterceptorStore::enumerate`]
    pub fn enumerate_interceptor<F>(&self, category: InterceptorCategory, f: F)
    where
        F: FnMut(&RegisteredInterceptor, usize, &mut bool),
    {
        if let Some(store) = self.store() {
            store.enumerate(category, f);
        }
    }
}

/// Load the process-wide registry
pub fn load_all() -> &'static InterceptorStore {
    InterceptorRegistry::global().load_all()
}

/// Every interceptor in the process-wide registry
pub fn interceptors() -> Vec<&'static RegisteredInterceptor> {
    InterceptorRegistry::global().interceptors()
}

/// Interceptors of one category in the process-wide registry
pub fn interceptors_of(category: InterceptorCategory) -> &'static [RegisteredInterceptor] {
    InterceptorRegistry::global().interceptors_of(category)
}

/// Whether the process-wide registry has an interceptor for `category`
pub fn has_interceptor(category: InterceptorCategory) -> bool {
    InterceptorRegistry::global().has_interceptor(category)
}

/// Visit interceptors of `category` in the process-wide registry
pub fn enumerate_interceptor<F>(category: InterceptorCategory, f: F)
where
    F: FnMut(&RegisteredInterceptor, usize, &mut bool),
{
    InterceptorRegistry::global().enumerate_interceptor(category, f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use trellis_plugin_api::testing::{MockEventTracker, MockNetworkInterceptor};
    use trellis_plugin_api::InterceptorInstance;

    type FactoryResult = trellis_plugin_api::error::Result<InterceptorInstance>;

    fn create_tracker() -> FactoryResult {
        Ok(InterceptorInstance::EventTrack(Arc::new(
            MockEventTracker::new(),
        )))
    }

    fn create_network() -> FactoryResult {
        Ok(InterceptorInstance::Network(Arc::new(
            MockNetworkInterceptor::new(),
        )))
    }

    static MARKERS: [InterceptorMarker; 3] = [
        InterceptorMarker::new("Primary", InterceptorCategory::EventTrack, create_tracker),
        InterceptorMarker::new("Stamp", InterceptorCategory::Network, create_network),
        InterceptorMarker::new("Secondary", InterceptorCategory::EventTrack, create_tracker),
    ];

    #[test]
    fn test_queries_before_loading_are_empty() {
        let registry = InterceptorRegistry::new();

        assert!(!registry.is_loaded());
        assert!(registry.interceptors().is_empty());
        assert!(registry.report().is_none());
        for category in InterceptorCategory::ALL {
            assert!(!registry.has_interceptor(category));
            assert!(registry.interceptors_of(category).is_empty());
        }

        let mut calls = 0;
        registry.enumerate_interceptor(InterceptorCategory::EventTrack, |_, _, _| calls += 1);
        assert_eq!(calls, 0);

        // Queries must not have triggered a scan
        assert!(!registry.is_loaded());
    }

    #[test]
    fn test_load_populates_categories() {
        let registry = InterceptorRegistry::new();
        registry.load_from(&MARKERS);

        assert!(registry.is_loaded());
        assert!(registry.has_interceptor(InterceptorCategory::EventTrack));
        assert!(registry.has_interceptor(InterceptorCategory::Network));
        assert!(!registry.has_interceptor(InterceptorCategory::Log));
        assert_eq!(registry.interceptors().len(), 3);
        assert_eq!(registry.report().unwrap().loaded.len(), 3);
    }

    #[test]
    fn test_second_load_is_a_noop() {
        let registry = InterceptorRegistry::new();
        let first = registry.load_from(&MARKERS);
        let second = registry.load_from(&MARKERS[..1]);

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn test_enumerate_matches_interceptors_order() {
        let registry = InterceptorRegistry::new();
        registry.load_from(&MARKERS);

        let listed: Vec<&str> = registry
            .interceptors_of(InterceptorCategory::EventTrack)
            .iter()
            .map(|e| e.name())
            .collect();

        let mut enumerated = Vec::new();
        registry.enumerate_interceptor(InterceptorCategory::EventTrack, |entry, _, _| {
            enumerated.push(entry.name());
        });

        assert_eq!(listed, vec!["Primary", "Secondary"]);
        assert_eq!(enumerated, listed);
    }

    static CONCURRENT_FACTORY_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn create_counted() -> FactoryResult {
        CONCURRENT_FACTORY_CALLS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        create_tracker()
    }

    static COUNTED_MARKERS: [InterceptorMarker; 2] = [
        InterceptorMarker::new("CountedA", InterceptorCategory::EventTrack, create_counted),
        InterceptorMarker::new("CountedB", InterceptorCategory::EventTrack, create_counted),
    ];

    #[test]
    fn test_concurrent_loads_scan_once() {
        let registry = InterceptorRegistry::new();

        let observed: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        registry
                            .load_from(&COUNTED_MARKERS)
                            .get(InterceptorCategory::EventTrack)
                            .len()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(observed.iter().all(|len| *len == 2));
        assert_eq!(CONCURRENT_FACTORY_CALLS.load(Ordering::SeqCst), 2);
        assert_eq!(registry.interceptors().len(), 2);
    }
}
