//! Image interceptor traits

use crate::interceptor::Interceptor;
use bytes::Bytes;

/// Web image interceptor
///
/// Rewrites remote image URLs before the runtime fetches them (CDN
/// resizing, format negotiation, and the like).
pub trait WebImageInterceptor: Interceptor {
    /// Return a replacement URL, or `None` to keep `src`
    fn rewrite_url(&self, src: &str, page_url: &str) -> Option<String>;
}

/// Image interceptor
///
/// Supplies image bytes itself instead of the default loader.
pub trait ImageInterceptor: Interceptor {
    /// Return the encoded image, or `None` to fall through to the default loader
    fn load_image(&self, src: &str, page_url: &str) -> Option<Bytes>;
}
