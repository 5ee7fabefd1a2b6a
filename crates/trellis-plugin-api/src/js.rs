//! JS loading and JS call interceptor traits

use crate::interceptor::Interceptor;
use serde::{Deserialize, Serialize};

/// JS bundle load interceptor
pub trait JsLoadInterceptor: Interceptor {
    /// Return script source to evaluate instead of fetching `url`
    fn load_script(&self, url: &str) -> Option<String>;
}

/// A call from JS into a native export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsCall {
    /// Exported native class
    pub class_name: String,

    /// Method invoked on the class
    pub method: String,

    /// Call arguments
    #[serde(default)]
    pub args: Vec<serde_json::Value>,

    /// Page the call originated from
    pub page_url: String,
}

/// JS call interceptor
pub trait JsCallerInterceptor: Interceptor {
    /// Inspect a JS to native call; `true` blocks it
    fn intercept_call(&self, call: &JsCall) -> bool;
}
