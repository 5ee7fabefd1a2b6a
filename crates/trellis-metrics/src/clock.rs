//! Monotonic clock
//!
//! Timestamps are measured from a process-local anchor captured on first use,
//! so they are only meaningful relative to each other within one process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Nanoseconds in one second
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Seconds and nanoseconds of monotonic time
///
/// A normalized value keeps `nanos` in `0..NANOS_PER_SEC`. Differences taken
/// in the wrong order produce negative `secs`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timespec {
    /// Whole seconds
    pub secs: i64,
    /// Nanoseconds within the second
    pub nanos: i64,
}

impl Timespec {
    /// Zero time
    pub const ZERO: Timespec = Timespec { secs: 0, nanos: 0 };

    /// Create a timespec from raw parts
    pub const fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }

    /// Whether this value lies before zero
    pub fn is_negative(&self) -> bool {
        self.secs < 0 || (self.secs == 0 && self.nanos < 0)
    }

    /// Convert to a [`Duration`], saturating negative values to zero
    pub fn as_duration(&self) -> Duration {
        if self.is_negative() {
            return Duration::ZERO;
        }
        let nanos = self.nanos.clamp(0, NANOS_PER_SEC - 1) as u32;
        Duration::new(self.secs as u64, nanos)
    }

    /// Fractional milliseconds
    pub fn as_millis_f64(&self) -> f64 {
        self.secs as f64 * 1_000.0 + self.nanos as f64 / 1_000_000.0
    }
}

impl From<Duration> for Timespec {
    fn from(duration: Duration) -> Self {
        Self {
            secs: i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
            nanos: i64::from(duration.subsec_nanos()),
        }
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.secs, self.nanos)
    }
}

/// Current monotonic time
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn now() -> Timespec {
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static ANCHOR: Lazy<Instant> = Lazy::new(Instant::now);

    Timespec::from(ANCHOR.elapsed())
}

/// Current monotonic time
///
/// This target has no monotonic clock, so every reading is zero.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn now() -> Timespec {
    Timespec::ZERO
}

/// Time from `before` to `after`
///
/// The arguments are not checked for order; passing them reversed yields a
/// negative result.
pub fn diff(before: Timespec, after: Timespec) -> Timespec {
    let mut secs = after.secs - before.secs;
    let mut nanos = after.nanos - before.nanos;
    if nanos < 0 {
        secs -= 1;
        nanos += NANOS_PER_SEC;
    }
    Timespec { secs, nanos }
}
