//! Time source for cooldown and duration gating
//!
//! Every timing read in the simulation goes through a `Clock`, in seconds.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A source of the current time in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Monotonic wall clock, measured from construction
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
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually driven clock for tests and headless runs
///
/// Clones share the same time, so a caller can keep a handle and advance
/// the clock that a `MatchSimulator` owns.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            time: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, secs: f64) {
        self.time.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.time.set(self.time.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}
