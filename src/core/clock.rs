//! Time sources.
//!
//! The engine never reads the wall clock directly. It asks a `Clock` for
//! milliseconds on a monotonic timeline, which lets tests and replays drive
//! time by hand with `ManualClock`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Real time, measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
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
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock.
///
/// Clones share the same timeline, so a test can keep one handle and give
/// the other to the engine.
///
/// ```
/// use memory_match::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let engine_side = clock.clone();
///
/// clock.advance(250);
/// assert_eq!(engine_side.now_ms(), 250);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Create a clock starting at 0 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move time forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    /// Jump to `now_ms`. Earlier values are ignored to keep time monotonic.
    pub fn set(&self, now_ms: u64) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
