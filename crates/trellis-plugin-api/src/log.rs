//! Log interceptor trait

use crate::interceptor::Interceptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very verbose diagnostics
    Trace,
    /// Debug output
    Debug,
    /// Informational
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// Failure
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Log interceptor
///
/// Returning `true` marks the line as consumed so the runtime skips its
/// default output.
pub trait LogInterceptor: Interceptor {
    /// Handle a log line emitted by native code
    fn handle_native_log(&self, level: LogLevel, message: &str) -> bool;

    /// Handle a log line emitted by JS running on a page
    fn handle_js_log(&self, level: LogLevel, message: &str, page_url: &str) -> bool {
        let _ = page_url;
        self.handle_native_log(level, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Warn);
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
