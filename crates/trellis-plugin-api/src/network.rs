//! Network interceptor trait

use crate::error::{PluginError, Result};
use crate::interceptor::Interceptor;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::collections::HashMap;

/// Body type alias
pub type Body = Full<Bytes>;

/// Page-level context handed to network interceptors
#[derive(Debug, Clone, Default)]
pub struct NetworkContext {
    /// URL of the page issuing the request
    pub page_url: String,

    /// Optional runtime namespace the page belongs to
    pub namespace: Option<String>,

    /// Custom metadata
    pub metadata: HashMap<String, serde_json::Value>,
}

impl NetworkContext {
    /// Create a context for a page
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            ..Default::default()
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Network interceptor
///
/// Sees every HTTP exchange a page performs through the runtime.
#[async_trait]
pub trait NetworkInterceptor: Interceptor {
    /// Intercept a request before it is sent
    ///
    /// Interceptors can:
    /// - Modify the request (headers, body, uri)
    /// - Continue to the next interceptor
    /// - Answer the request immediately (short-circuit)
    /// - Abort with an error
    async fn intercept_request(
        &self,
        req: &mut Request<Body>,
        ctx: &NetworkContext,
    ) -> Result<InterceptorAction>;

    /// Intercept a response before it is handed back to the page
    async fn intercept_response(
        &self,
        _res: &mut Response<Body>,
        _ctx: &NetworkContext,
    ) -> Result<InterceptorAction> {
        Ok(InterceptorAction::Continue)
    }
}

/// Action to take after interception
#[derive(Debug)]
pub enum InterceptorAction {
    /// Continue to next interceptor/transport
    Continue,

    /// Stop processing and answer with this response (request stage only)
    Return(Response<Body>),

    /// Abort with error
    Abort(PluginError),
}

impl InterceptorAction {
    /// Check if action is continue
    pub fn is_continue(&self) -> bool {
        matches!(self, InterceptorAction::Continue)
    }

    /// Check if action is return
    pub fn is_return(&self) -> bool {
        matches!(self, InterceptorAction::Return(_))
    }

    /// Check if action is abort
    pub fn is_abort(&self) -> bool {
        matches!(self, InterceptorAction::Abort(_))
    }

    /// Convert to result, treating Abort as error
    pub fn into_result(self) -> Result<Option<Response<Body>>> {
        match self {
            InterceptorAction::Continue => Ok(None),
            InterceptorAction::Return(res) => Ok(Some(res)),
            InterceptorAction::Abort(err) => Err(err),
        }
    }
}
