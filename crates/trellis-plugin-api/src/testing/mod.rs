//! Testing utilities for interceptor developers
//!
//! This module provides recording mocks for the capability traits.

pub mod mocks;

pub use mocks::{MockEventTracker, MockLogInterceptor, MockNetworkInterceptor, TrackCall};
