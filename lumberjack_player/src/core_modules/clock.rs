// Time is a seam: the pacer and the executor both read the clock and block on
// it. Real runs use `SystemClock`; tests swap in a clock that records sleeps
// instead of performing them, so damping and pacing can be asserted exactly.
//
// Two timelines are exposed. `now_millis` is monotonic and drives every
// deadline, so stepping the system clock can never stretch a nap.
// `epoch_millis` is wall time and only names trace files.

use chrono::Utc;
use std::time::{Duration, Instant};

/// Millisecond clock with a blocking sleep.
pub trait Clock {
    /// Monotonic milliseconds from an arbitrary origin. Never goes backwards.
    fn now_millis(&self) -> u64;

    /// Milliseconds since the Unix epoch. Defaults to the monotonic reading,
    /// which is what scripted clocks want.
    fn epoch_millis(&self) -> u64 {
        self.now_millis()
    }

    /// Blocks the calling thread for `millis` milliseconds.
    fn sleep(&self, millis: u64);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }

    fn epoch_millis(&self) -> u64 {
        (**self).epoch_millis()
    }

    fn sleep(&self, millis: u64) {
        (**self).sleep(millis)
    }
}

/// `Instant` for deadlines, `chrono` for file names.
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
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn epoch_millis(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }

    fn sleep(&self, millis: u64) {
        std::thread::sleep(Duration::from_millis(millis));
    }
}
