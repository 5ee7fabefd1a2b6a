//! Timing and tracking for Trellis pages
//!
//! This crate provides:
//! - A monotonic clock with second/nanosecond readings ([`clock`])
//! - A [`Stopwatch`] and [`measure`] helper built on it
//! - [`TrackingDispatcher`], which forwards page lifecycle events to every
//!   registered event-track interceptor
//!
//! ```no_run
//! use trellis_metrics::{measure, TrackingDispatcher};
//!
//! trellis_plugin_runtime::load_all();
//! let dispatcher = TrackingDispatcher::global();
//!
//! let (_, elapsed) = measure(|| { /* render */ });
//! dispatcher.page_rendered(elapsed, "app://home");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod clock;
pub mod dispatch;
pub mod stopwatch;

pub use clock::{diff, now, Timespec, NANOS_PER_SEC};
pub use dispatch::TrackingDispatcher;
pub use stopwatch::{measure, Stopwatch};
