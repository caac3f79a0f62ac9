//! Step timing helpers.
//!
//! Provides an RAII profiling scope that reports through `tracing` and a
//! frame timer that keeps the last measured step duration.

use std::time::Instant;

use tracing::trace;

/// A profiling scope that measures elapsed time using RAII.
///
/// The elapsed time is emitted as a `trace!` event when the scope is dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!("{} took {:.3}ms", self.name, self.elapsed_ms());
    }
}

/// Keeps the duration of the most recent solver step.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last_frame_time_ms: f64,
}

impl FrameTimer {
    /// Creates a new frame timer.
    pub fn new() -> Self {
        Self {
            last_frame_time_ms: 0.0,
        }
    }

    /// Records frame time in milliseconds.
    pub fn record(&mut self, time_ms: f64) {
        self.last_frame_time_ms = time_ms;
    }

    /// Gets the last recorded frame time.
    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time_ms
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
