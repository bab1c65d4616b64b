// THEORY:
// The `Pacer` caps the loop at a target frame rate with fixed-rate scheduling.
// Each call computes the deadline for the current frame from the previous frame's
// timestamp, not from "now". An iteration that finishes early sleeps only up to
// that deadline. An iteration that overruns returns at once and re-anchors at the
// current time. There is no catch-up burst after a slow frame.
//
// A nap never exceeds one frame interval. If the clock ever reads earlier than
// the previous frame, the schedule waits at most one frame and re-anchors.

use crate::core_modules::clock::Clock;
use crate::error::{PlayerError, Result};
use tracing::debug;

/// Mutable timing state, owned by the pacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacerState {
    pub last_frame_timestamp: u64,
    /// Whole milliseconds per frame, truncated from `1000 / fps`.
    pub frame_interval: u64,
}

pub struct Pacer<C> {
    clock: C,
    state: PacerState,
}

/// `floor(1000 / fps)` in milliseconds. Rejects rates that are not finite and
/// positive.
pub fn frame_interval_millis(fps: f64) -> Result<u64> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(PlayerError::Config(format!(
            "fps must be a positive number, got {fps}"
        )));
    }
    Ok((1000.0 / fps) as u64)
}

impl<C: Clock> Pacer<C> {
    /// Starts the schedule at the current time.
    pub fn new(clock: C, fps: f64) -> Result<Self> {
        let frame_interval = frame_interval_millis(fps)?;
        let last_frame_timestamp = clock.now_millis();
        Ok(Self {
            clock,
            state: PacerState {
                last_frame_timestamp,
                frame_interval,
            },
        })
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    /// Blocks until the next frame is due. Returns how long it slept.
    pub fn throttle(&mut self) -> u64 {
        let next_frame = self
            .state
            .last_frame_timestamp
            .saturating_add(self.state.frame_interval);
        let now = self.clock.now_millis();
        if now >= next_frame {
            self.state.last_frame_timestamp = now;
            return 0;
        }

        let nap = (next_frame - now).min(self.state.frame_interval);
        debug!(nap_ms = nap, "take a nap");
        self.clock.sleep(nap);
        self.state.last_frame_timestamp = self.clock.now_millis();
        nap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct ManualClock {
        now: Cell<u64>,
        naps: RefCell<Vec<u64>>,
    }

    impl ManualClock {
        fn at(now: u64) -> Self {
            let clock = Self::default();
            clock.now.set(now);
            clock
        }

        fn advance(&self, millis: u64) {
            self.now.set(self.now.get() + millis);
        }

        fn rewind(&self, millis: u64) {
            self.now.set(self.now.get() - millis);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> u64 {
            self.now.get()
        }

        fn sleep(&self, millis: u64) {
            self.naps.borrow_mut().push(millis);
            self.advance(millis);
        }
    }

    #[test]
    fn interval_is_floor_truncated() {
        assert_eq!(frame_interval_millis(10.0).unwrap(), 100);
        assert_eq!(frame_interval_millis(3.0).unwrap(), 333);
        assert_eq!(frame_interval_millis(2000.0).unwrap(), 0);
    }

    #[test]
    fn rejects_non_positive_rates() {
        for fps in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                frame_interval_millis(fps),
                Err(PlayerError::Config(_))
            ));
        }
    }

    #[test]
    fn early_iteration_sleeps_until_deadline() {
        let clock = ManualClock::at(1_000);
        let mut pacer = Pacer::new(&clock, 10.0).unwrap();

        clock.advance(30);
        assert_eq!(pacer.throttle(), 70);

        assert_eq!(*clock.naps.borrow(), vec![70]);
        assert_eq!(pacer.state().last_frame_timestamp, 1_100);
    }

    #[test]
    fn late_iteration_returns_immediately_and_reanchors() {
        let clock = ManualClock::at(1_000);
        let mut pacer = Pacer::new(&clock, 10.0).unwrap();

        clock.advance(250);
        assert_eq!(pacer.throttle(), 0);

        assert!(clock.naps.borrow().is_empty());
        assert_eq!(pacer.state().last_frame_timestamp, 1_250);
    }

    #[test]
    fn exactly_on_deadline_does_not_sleep() {
        let clock = ManualClock::at(0);
        let mut pacer = Pacer::new(&clock, 4.0).unwrap();
        clock.advance(250);
        assert_eq!(pacer.throttle(), 0);
    }

    #[test]
    fn schedule_stays_on_phase_across_frames() {
        let clock = ManualClock::at(0);
        let mut pacer = Pacer::new(&clock, 20.0).unwrap();

        for work in [10, 45, 20] {
            clock.advance(work);
            pacer.throttle();
        }

        assert_eq!(*clock.naps.borrow(), vec![40, 5, 30]);
        assert_eq!(clock.now_millis(), 150);
    }

    #[test]
    fn clock_stepping_back_costs_at_most_one_frame() {
        let clock = ManualClock::at(10_000_000);
        let mut pacer = Pacer::new(&clock, 10.0).unwrap();

        clock.rewind(3_600_000);
        assert_eq!(pacer.throttle(), 100);

        assert_eq!(*clock.naps.borrow(), vec![100]);
        assert_eq!(pacer.state().last_frame_timestamp, 6_400_100);
    }
}
