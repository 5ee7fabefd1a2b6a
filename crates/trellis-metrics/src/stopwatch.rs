//! Elapsed-time measurement on top of [`clock`](crate::clock)

use crate::clock::{self, Timespec};

/// Measures time since it was started
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Timespec,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            started: clock::now(),
        }
    }

    /// Reading taken at start
    pub fn started_at(&self) -> Timespec {
        self.started
    }

    /// Time since start
    pub fn elapsed(&self) -> Timespec {
        clock::diff(self.started, clock::now())
    }

    /// Return the elapsed time and start over
    pub fn restart(&mut self) -> Timespec {
        let now = clock::now();
        let elapsed = clock::diff(self.started, now);
        self.started = now;
        elapsed
    }
}

/// Run `f` and return its output with the time it took
pub fn measure<T, F>(f: F) -> (T, Timespec)
where
    F: FnOnce() -> T,
{
    let watch = Stopwatch::start();
    let output = f();
    (output, watch.elapsed())
}
