//! Link-time interceptor registration
//!
//! Each `export_interceptor!` invocation places one [`InterceptorMarker`] in
//! an `inventory` collection. No list of interceptors is maintained in
//! source; the runtime discovers markers by iterating the collection once.

use crate::category::InterceptorCategory;
use crate::error::Result;
use crate::interceptor::InterceptorInstance;
use std::fmt;

/// Factory producing a live interceptor from its registration
pub type InterceptorFactory = fn() -> Result<InterceptorInstance>;

/// A self-registered interceptor
///
/// Markers are built in const context and live in the binary image; they are
/// never allocated, mutated or freed.
pub struct InterceptorMarker {
    name: &'static str,
    category: InterceptorCategory,
    factory: InterceptorFactory,
}

impl InterceptorMarker {
    /// Create a marker
    pub const fn new(
        name: &'static str,
        category: InterceptorCategory,
        factory: InterceptorFactory,
    ) -> Self {
        Self {
            name,
            category,
            factory,
        }
    }

    /// Registered name (the type name for `export_interceptor!`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Category the registration declares
    pub fn category(&self) -> InterceptorCategory {
        self.category
    }

    /// Run the factory
    pub fn create(&self) -> Result<InterceptorInstance> {
        (self.factory)()
    }
}

impl fmt::Debug for InterceptorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorMarker")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

inventory::collect!(InterceptorMarker);

/// Every marker linked into the current binary
///
/// Iteration order is decided by the linker and loader. It is stable for one
/// binary but not across builds.
pub fn registered_markers() -> impl Iterator<Item = &'static InterceptorMarker> {
    inventory::iter::<InterceptorMarker>.into_iter()
}

/// Register an interceptor type for discovery at startup
///
/// The category names an [`InterceptorInstance`] variant; the type must
/// implement that category's capability trait or the invocation does not
/// compile.
///
/// ```rust,ignore
/// use trellis_plugin_api::prelude::*;
///
/// #[derive(Debug, Default)]
/// struct ConsoleLogger;
///
/// impl Interceptor for ConsoleLogger {}
///
/// impl LogInterceptor for ConsoleLogger {
///     fn handle_native_log(&self, level: LogLevel, message: &str) -> bool {
///         println!("[{level}] {message}");
///         true
///     }
/// }
///
/// // Built with `Default`
/// trellis_plugin_api::export_interceptor!(Log => ConsoleLogger);
///
/// // Or with a fallible factory
/// fn build_logger() -> Result<ConsoleLogger, PluginError> {
///     Ok(ConsoleLogger)
/// }
/// trellis_plugin_api::export_interceptor!(Log => ConsoleLogger, build_logger);
/// ```
#[macro_export]
macro_rules! export_interceptor {
    ($category:ident => $ty:ty) => {
        $crate::export_interceptor!($category => $ty, || {
            ::std::result::Result::Ok(<$ty as ::std::default::Default>::default())
        });
    };
    ($category:ident => $ty:ty, $factory:expr) => {
        const _: () = {
            fn __trellis_create_interceptor(
            ) -> $crate::error::Result<$crate::interceptor::InterceptorInstance> {
                let create: fn() -> $crate::error::Result<$ty> = $factory;
                let interceptor = create()?;
                ::std::result::Result::Ok($crate::interceptor::InterceptorInstance::$category(
                    ::std::sync::Arc::new(interceptor),
                ))
            }

            $crate::__private::inventory::submit! {
                $crate::marker::InterceptorMarker::new(
                    ::std::stringify!($ty),
                    $crate::category::InterceptorCategory::$category,
                    __trellis_create_interceptor,
                )
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::interceptor::Interceptor;
    use crate::js::JsLoadInterceptor;
    use std::sync::Arc;

    #[derive(Debug)]
    struct InlineScripts;

    impl Interceptor for InlineScripts {}

    impl JsLoadInterceptor for InlineScripts {
        fn load_script(&self, url: &str) -> Option<String> {
            url.starts_with("inline://").then(|| "void 0".to_string())
        }
    }

    fn create_inline() -> Result<InterceptorInstance> {
        Ok(InterceptorInstance::JsLoad(Arc::new(InlineScripts)))
    }

    fn create_broken() -> Result<InterceptorInstance> {
        Err(PluginError::config("missing bundle root"))
    }

    #[test]
    fn test_marker_accessors() {
        const MARKER: InterceptorMarker =
            InterceptorMarker::new("InlineScripts", InterceptorCategory::JsLoad, create_inline);

        assert_eq!(MARKER.name(), "InlineScripts");
        assert_eq!(MARKER.category(), InterceptorCategory::JsLoad);

        let instance = MARKER.create().unwrap();
        let loader = instance.expect_js_load().unwrap();
        assert_eq!(loader.load_script("inline://a").as_deref(), Some("void 0"));
        assert!(loader.load_script("https://cdn/a.js").is_none());
    }

    #[test]
    fn test_marker_factory_failure() {
        let marker =
            InterceptorMarker::new("Broken", InterceptorCategory::JsLoad, create_broken);
        assert!(marker.create().is_err());
        assert_eq!(
            format!("{marker:?}"),
            "InterceptorMarker { name: \"Broken\", category: JsLoad }"
        );
    }
}
