//! Registration scanner
//!
//! Turns link-time markers into live interceptors. Population is best effort:
//! a marker that cannot be turned into a correctly categorised instance is
//! skipped and reported, never fatal.

use crate::config::RegistryConfig;
use crate::store::{InterceptorStore, RegisteredInterceptor};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};
use trellis_plugin_api::{InterceptorCategory, InterceptorMarker};

/// Why a marker was not loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Name is disabled by configuration
    Disabled,
    /// Factory failed to produce an instance
    ResolutionFailed {
        /// Factory error
        message: String,
    },
    /// Instance category differs from the declared one
    CategoryMismatch {
        /// Category on the marker
        declared: InterceptorCategory,
        /// Category of the produced instance
        actual: InterceptorCategory,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => f.write_str("disabled by configuration"),
            SkipReason::ResolutionFailed { message } => write!(f, "resolution failed: {message}"),
            SkipReason::CategoryMismatch { declared, actual } => {
                write!(f, "declared {declared} but produced {actual}")
            }
        }
    }
}

/// A marker the scanner did not load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInterceptor {
    /// Registered name
    pub name: &'static str,
    /// Declared category
    pub category: InterceptorCategory,
    /// Reason for skipping
    pub reason: SkipReason,
}

/// Outcome of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Names loaded, in scan order, with their category
    pub loaded: Vec<(&'static str, InterceptorCategory)>,
    /// Markers that were skipped
    pub skipped: Vec<SkippedInterceptor>,
}

impl ScanReport {
    /// Number of markers examined
    pub fn scanned(&self) -> usize {
        self.loaded.len() + self.skipped.len()
    }
}

/// Builds an [`InterceptorStore`] from markers
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: RegistryConfig,
}

impl Scanner {
    /// Create a scanner
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Scanner configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Instantiate every usable marker, preserving iteration order
    pub fn scan<'a, I>(&self, markers: I) -> (InterceptorStore, ScanReport)
    where
        I: IntoIterator<Item = &'a InterceptorMarker>,
    {
        let mut store = InterceptorStore::new();
        let mut report = ScanReport::default();

        for marker in markers {
            match self.resolve(marker) {
                Ok(entry) => {
                    debug!(
                        interceptor = %entry.name(),
                        category = %entry.category(),
                        "Interceptor loaded"
                    );
                    report.loaded.push((entry.name(), entry.category()));
                    store.push(entry);
                }
                Err(reason) => {
                    self.log_skip(marker, &reason);
                    report.skipped.push(SkippedInterceptor {
                        name: marker.name(),
                        category: marker.category(),
                        reason,
                    });
                }
            }
        }

        info!(
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            "Interceptor scan complete"
        );

        (store, report)
    }

    fn resolve(
        &self,
        marker: &InterceptorMarker,
    ) -> std::result::Result<RegisteredInterceptor, SkipReason> {
        if self.config.is_disabled(marker.name()) {
            return Err(SkipReason::Disabled);
        }

        let instance = marker
            .create()
            .map_err(|e| SkipReason::ResolutionFailed {
                message: e.to_string(),
            })?;

        if instance.category() != marker.category() {
            return Err(SkipReason::CategoryMismatch {
                declared: marker.category(),
                actual: instance.category(),
            });
        }

        Ok(RegisteredInterceptor::new(marker.name(), instance))
    }

    fn log_skip(&self, marker: &InterceptorMarker, reason: &SkipReason) {
        match reason {
            SkipReason::Disabled => debug!(
                interceptor = %marker.name(),
                "Interceptor disabled, skipping"
            ),
            SkipReason::CategoryMismatch { .. } if !self.config.strict_categories => debug!(
                interceptor = %marker.name(),
                reason = %reason,
                "Interceptor skipped"
            ),
            _ => warn!(
                interceptor = %marker.name(),
                category = %marker.category(),
                reason = %reason,
                "Interceptor skipped"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trellis_plugin_api::testing::{MockEventTracker, MockLogInterceptor};
    use trellis_plugin_api::{InterceptorInstance, PluginError};

    fn create_tracker() -> trellis_plugin_api::error::Result<InterceptorInstance> {
        Ok(InterceptorInstance::EventTrack(Arc::new(
            MockEventTracker::new(),
        )))
    }

    fn create_logger() -> trellis_plugin_api::error::Result<InterceptorInstance> {
        Ok(InterceptorInstance::Log(Arc::new(MockLogInterceptor::new())))
    }

    fn create_failing() -> trellis_plugin_api::error::Result<InterceptorInstance> {
        Err(PluginError::resolution("Unavailable", "no such type"))
    }

    static MARKERS: [InterceptorMarker; 5] = [
        InterceptorMarker::new("TrackerA", InterceptorCategory::EventTrack, create_tracker),
        InterceptorMarker::new("Console", InterceptorCategory::Log, create_logger),
        InterceptorMarker::new("Unavailable", InterceptorCategory::Network, create_failing),
        InterceptorMarker::new("Mislabelled", InterceptorCategory::Router, create_logger),
        InterceptorMarker::new("TrackerB", InterceptorCategory::EventTrack, create_tracker),
    ];

    #[test]
    fn test_scan_loads_resolvable_markers_in_order() {
        let (store, report) = Scanner::default().scan(&MARKERS);

        let trackers: Vec<&str> = store
            .get(InterceptorCategory::EventTrack)
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(trackers, vec!["TrackerA", "TrackerB"]);
        assert_eq!(store.get(InterceptorCategory::Log).len(), 1);
        assert!(!store.has(InterceptorCategory::Network));
        assert!(!store.has(InterceptorCategory::Router));

        assert_eq!(
            report.loaded,
            vec![
                ("TrackerA", InterceptorCategory::EventTrack),
                ("Console", InterceptorCategory::Log),
                ("TrackerB", InterceptorCategory::EventTrack),
            ]
        );
        assert_eq!(report.scanned(), 5);
    }

    #[test]
    fn test_scan_reports_skips() {
        let (_, report) = Scanner::default().scan(&MARKERS);

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].name, "Unavailable");
        assert!(matches!(
            report.skipped[0].reason,
            SkipReason::ResolutionFailed { .. }
        ));
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::CategoryMismatch {
                declared: InterceptorCategory::Router,
                actual: InterceptorCategory::Log,
            }
        );
    }

    #[test]
    fn test_scan_honours_disabled_names() {
        let scanner = Scanner::new(RegistryConfig::default().disable("TrackerA"));
        let (store, report) = scanner.scan(&MARKERS);

        let trackers: Vec<&str> = store
            .get(InterceptorCategory::EventTrack)
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(trackers, vec!["TrackerB"]);
        assert!(report
            .skipped
            .iter()
            .any(|s| s.name == "TrackerA" && s.reason == SkipReason::Disabled));
    }

    #[test]
    fn test_scan_empty_source() {
        let (store, report) = Scanner::default().scan(std::iter::empty());
        assert!(store.is_empty());
        assert_eq!(report, ScanReport::default());
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::CategoryMismatch {
            declared: InterceptorCategory::Router,
            actual: InterceptorCategory::Log,
        };
        assert_eq!(reason.to_string(), "declared router but produced log");
        assert_eq!(SkipReason::Disabled.to_string(), "disabled by configuration");
    }
}
