//! Event tracking contract
//!
//! Event-track interceptors receive already-measured values: durations,
//! sizes and labelled samples. Measuring is the caller's job (see the
//! `trellis-metrics` crate).

use crate::interceptor::Interceptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Value carried by a performance sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceValue {
    /// Free-form value such as a version string
    Text(String),
    /// Numeric measurement
    Number(f64),
}

impl fmt::Display for PerformanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceValue::Text(s) => f.write_str(s),
            PerformanceValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<f64> for PerformanceValue {
    fn from(value: f64) -> Self {
        PerformanceValue::Number(value)
    }
}

impl From<String> for PerformanceValue {
    fn from(value: String) -> Self {
        PerformanceValue::Text(value)
    }
}

impl From<&str> for PerformanceValue {
    fn from(value: &str) -> Self {
        PerformanceValue::Text(value.to_string())
    }
}

/// Labelled performance sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Machine label, e.g. `first_screen_ms`
    pub label: String,

    /// Label suitable for display, possibly localized
    pub localizable_label: String,

    /// Sampled value
    pub value: PerformanceValue,

    /// Unit of `value`, e.g. `ms` or `KB`
    pub unit: String,
}

impl PerformanceSample {
    /// Create a sample whose display label equals its machine label
    pub fn new(
        label: impl Into<String>,
        value: impl Into<PerformanceValue>,
        unit: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            localizable_label: label.clone(),
            label,
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Override the display label
    pub fn with_localizable_label(mut self, label: impl Into<String>) -> Self {
        self.localizable_label = label.into();
        self
    }
}

/// Structured description of a JS exception
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionModel {
    /// Exception name, e.g. `TypeError`
    pub name: String,

    /// Exception message
    pub message: String,

    /// JS stack, if captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ExceptionModel {
    /// Create an exception description
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack trace
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl fmt::Display for ExceptionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Tracking collaborator registered under the event-track category
pub trait EventTracker: Interceptor {
    /// Time taken to bring the JS engine up
    fn track_engine_initialization(&self, duration: Duration);

    /// Size in bytes of the JS bundle loaded for a page
    fn track_javascript_bundle(&self, size: u64, page_url: &str);

    /// Time until a page finished its first render
    fn track_page_render_completion(&self, duration: Duration, page_url: &str);

    /// Time spent evaluating a page's bundle
    fn track_evaluation(&self, duration: Duration, page_url: &str);

    /// Arbitrary labelled sample
    fn track_performance(&self, sample: &PerformanceSample, page_url: &str);

    /// JS exception raised on a page
    fn track_javascript_exception(&self, exception: &ExceptionModel, page_url: &str);

    /// Page was opened
    fn track_page_view(&self, page_url: &str);

    /// Page rendered successfully
    fn track_page_success(&self, page_url: &str);
}
