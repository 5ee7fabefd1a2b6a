//! Base interceptor trait and the category-tagged instance container

use crate::category::InterceptorCategory;
use crate::error::{PluginError, Result};
use crate::image::{ImageInterceptor, WebImageInterceptor};
use crate::js::{JsCallerInterceptor, JsLoadInterceptor};
use crate::log::LogInterceptor;
use crate::network::NetworkInterceptor;
use crate::reporter::ReporterInterceptor;
use crate::router::RouterInterceptor;
use crate::track::EventTracker;
use std::fmt;
use std::sync::Arc;

/// Base trait shared by every interceptor capability
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// Human readable description
    fn description(&self) -> &str {
        ""
    }
}

/// A live interceptor tagged with the capability it provides
///
/// The variant is the category, so an interceptor cannot be stored under a
/// category whose capability trait it does not implement.
#[derive(Debug, Clone)]
pub enum InterceptorInstance {
    /// [`InterceptorCategory::Log`]
    Log(Arc<dyn LogInterceptor>),
    /// [`InterceptorCategory::Network`]
    Network(Arc<dyn NetworkInterceptor>),
    /// [`InterceptorCategory::WebImage`]
    WebImage(Arc<dyn WebImageInterceptor>),
    /// [`InterceptorCategory::Reporter`]
    Reporter(Arc<dyn ReporterInterceptor>),
    /// [`InterceptorCategory::Router`]
    Router(Arc<dyn RouterInterceptor>),
    /// [`InterceptorCategory::Image`]
    Image(Arc<dyn ImageInterceptor>),
    /// [`InterceptorCategory::EventTrack`]
    EventTrack(Arc<dyn EventTracker>),
    /// [`InterceptorCategory::JsLoad`]
    JsLoad(Arc<dyn JsLoadInterceptor>),
    /// [`InterceptorCategory::JsCaller`]
    JsCaller(Arc<dyn JsCallerInterceptor>),
}

macro_rules! capability_accessors {
    ($($variant:ident => $as_fn:ident, $expect_fn:ident, $cap:ident;)*) => {
        impl InterceptorInstance {
            /// Category this instance was registered under
            pub fn category(&self) -> InterceptorCategory {
                match self {
                    $(InterceptorInstance::$variant(_) => InterceptorCategory::$variant,)*
                }
            }

            /// Description reported by the underlying interceptor
            pub fn description(&self) -> &str {
                match self {
                    $(InterceptorInstance::$variant(inner) => inner.description(),)*
                }
            }

            $(
                #[doc = concat!("Borrow as `", stringify!($cap), "` if the category matches")]
                pub fn $as_fn(&self) -> Option<&Arc<dyn $cap>> {
                    match self {
                        InterceptorInstance::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[doc = concat!("Borrow as `", stringify!($cap), "`, failing with a capability mismatch otherwise")]
                pub fn $expect_fn(&self) -> Result<&Arc<dyn $cap>> {
                    self.$as_fn().ok_or_else(|| self.mismatch(InterceptorCategory::$variant))
                }
            )*
        }
    };
}

capability_accessors! {
    Log => as_log, expect_log, LogInterceptor;
    Network => as_network, expect_network, NetworkInterceptor;
    WebImage => as_web_image, expect_web_image, WebImageInterceptor;
    Reporter => as_reporter, expect_reporter, ReporterInterceptor;
    Router => as_router, expect_router, RouterInterceptor;
    Image => as_image, expect_image, ImageInterceptor;
    EventTrack => as_event_tracker, expect_event_tracker, EventTracker;
    JsLoad => as_js_load, expect_js_load, JsLoadInterceptor;
    JsCaller => as_js_caller, expect_js_caller, JsCallerInterceptor;
}

impl InterceptorInstance {
    fn mismatch(&self, expected: InterceptorCategory) -> PluginError {
        let description = self.description();
        let interceptor = if description.is_empty() {
            format!("{self:?}")
        } else {
            description.to_string()
        };
        PluginError::capability_mismatch(interceptor, expected, self.category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogLevel;

    #[derive(Debug)]
    struct QuietLogger;

    impl Interceptor for QuietLogger {
        fn description(&self) -> &str {
            "quiet logger"
        }
    }

    impl LogInterceptor for QuietLogger {
        fn handle_native_log(&self, _level: LogLevel, _message: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_category_follows_variant() {
        let instance = InterceptorInstance::Log(Arc::new(QuietLogger));
        assert_eq!(instance.category(), InterceptorCategory::Log);
        assert_eq!(instance.description(), "quiet logger");
    }

    #[test]
    fn test_matching_capability() {
        let instance = InterceptorInstance::Log(Arc::new(QuietLogger));
        let logger = instance.expect_log().unwrap();
        assert!(logger.handle_native_log(LogLevel::Info, "hello"));
        assert!(instance.as_network().is_none());
    }

    #[test]
    fn test_capability_mismatch() {
        let instance = InterceptorInstance::Log(Arc::new(QuietLogger));
        let err = instance.expect_event_tracker().unwrap_err();

        match err {
            PluginError::CapabilityMismatch {
                interceptor,
                expected,
                actual,
            } => {
                assert_eq!(interceptor, "quiet logger");
                assert_eq!(expected, InterceptorCategory::EventTrack);
                assert_eq!(actual, InterceptorCategory::Log);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
