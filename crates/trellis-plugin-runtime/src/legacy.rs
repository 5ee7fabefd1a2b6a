//! Compatibility shim for the pre-registry interceptor surface
//!
//! Older embedders call these names directly. They forward to the
//! process-wide [`InterceptorRegistry`](crate::InterceptorRegistry) and will
//! be removed together with this module.

use crate::registry;
use crate::store::RegisteredInterceptor;
use trellis_plugin_api::InterceptorCategory;

/// Load exported interceptors into the process-wide registry
#[deprecated(note = "use `InterceptorRegistry::global().load_all()`")]
pub fn load_export_interceptor() {
    registry::load_all();
}

/// Every loaded interceptor, or `None` before loading
#[deprecated(note = "use `InterceptorRegistry::interceptors`")]
pub fn all_interceptors() -> Option<Vec<&'static RegisteredInterceptor>> {
    let all = registry::interceptors();
    (!all.is_empty()).then_some(all)
}

/// Interceptors of one category, or `None` when there are none
#[deprecated(note = "use `InterceptorRegistry::interceptors_of`")]
pub fn interceptor(category: InterceptorCategory) -> Option<&'static [RegisteredInterceptor]> {
    let entries = registry::interceptors_of(category);
    (!entries.is_empty()).then_some(entries)
}

/// Whether `category` has an interceptor
#[deprecated(note = "use `InterceptorRegistry::has_interceptor`")]
pub fn has_interceptor(category: InterceptorCategory) -> bool {
    registry::has_interceptor(category)
}

/// Visit interceptors of `category` with a stop flag
#[deprecated(note = "use `InterceptorRegistry::enumerate_interceptor`")]
pub fn enumerate_interceptor<F>(category: InterceptorCategory, block: F)
where
    F: FnMut(&RegisteredInterceptor, usize, &mut bool),
{
    registry::enumerate_interceptor(category, block)
}
