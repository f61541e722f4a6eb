//! L4 Atomic Layer: Time sources for drag sampling
//!
//! Velocity sampling needs a wall clock that never runs backwards. The
//! `SystemClock` reads a monotonic `Instant`; `ManualClock` is advanced by hand
//! and is shared between a tracker and whatever drives it (tests, simulations).

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source
pub trait Clock {
    /// Current time in milliseconds. Never decreases between calls.
    fn now_ms(&self) -> f64;
}

/// Monotonic clock measured from its own creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move time forward. Negative steps are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to an absolute reading, never earlier than the current one
    pub fn set(&self, ms: f64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
