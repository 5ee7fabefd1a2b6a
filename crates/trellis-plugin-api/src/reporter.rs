//! Reporter interceptor trait

use crate::interceptor::Interceptor;
use crate::track::ExceptionModel;

/// Exception reporter
pub trait ReporterInterceptor: Interceptor {
    /// Report an exception raised while running a page
    fn report_exception(&self, exception: &ExceptionModel, page_url: &str);
}
