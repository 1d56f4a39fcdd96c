//! Fixed-timestep scheduler
//!
//! The host (window loop, test harness) owns frame pacing; the timer
//! only converts wall-clock samples into a deterministic sequence of
//! fixed-size simulation steps. Variable frame time goes into an
//! accumulator and is drained in whole steps, so the simulation
//! advances by exactly `step` per update regardless of display rate.
//!
//! Two guards against the classic delta-time bugs:
//! - the first sample only primes the timer (no huge first step when
//!   there is no previous timestamp);
//! - each frame's elapsed time is clamped to `max_frame` before it
//!   enters the accumulator (a backgrounded-then-resumed host catches
//!   up a bounded amount instead of simulating minutes at once).

use super::error::{CoreError, StepError};

/// Host time source, in seconds of wall-clock time.
///
/// Returns `None` when the environment has no usable clock; the timer
/// refuses to start in that case.
pub trait Clock {
    fn sample(&mut self) -> Option<f64>;
}

/// Converts wall-clock elapsed time into fixed simulation steps.
pub struct FixedTimer {
    /// Fixed simulation step, in seconds.
    step: f32,
    /// Upper bound on per-frame elapsed time entering the accumulator.
    max_frame: f32,
    /// Unconsumed elapsed time, always < `step` after a tick.
    accumulator: f32,
    /// Wall-clock time of the previous sample; `None` until started.
    last: Option<f64>,
    /// Total simulated time, in seconds.
    total_time: f64,
    /// Number of fixed steps run so far.
    step_count: u64,
}

impl FixedTimer {
    /// Default simulation step: 60 updates per simulated second.
    pub const DEFAULT_STEP: f32 = 1.0 / 60.0;

    /// Default clamp on one frame's elapsed time.
    pub const DEFAULT_MAX_FRAME: f32 = 0.25;

    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_frame: Self::DEFAULT_MAX_FRAME,
            accumulator: 0.0,
            last: None,
            total_time: 0.0,
            step_count: 0,
        }
    }

    /// Override the per-frame elapsed-time clamp.
    pub fn with_max_frame(mut self, max_frame: f32) -> Self {
        self.max_frame = max_frame;
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Prime the timer from the host clock. Runs no steps.
    ///
    /// Fails with `UnsupportedEnvironment` when the host cannot supply
    /// time; there is no retry, scheduling is entirely host-driven.
    pub fn start<C: Clock>(&mut self, clock: &mut C) -> Result<(), CoreError> {
        let now = clock.sample().ok_or(CoreError::UnsupportedEnvironment)?;
        self.last = Some(now);
        self.accumulator = 0.0;
        Ok(())
    }

    /// Advance by the wall-clock time since the previous sample,
    /// invoking `run(step)` once per whole fixed step accumulated.
    /// Returns the number of steps run this tick.
    ///
    /// A failing step aborts the tick immediately; the remaining
    /// accumulated time stays queued for the next frame.
    pub fn tick<C, F>(&mut self, clock: &mut C, mut run: F) -> Result<u32, CoreError>
    where
        C: Clock,
        F: FnMut(f32) -> Result<(), StepError>,
    {
        let now = clock.sample().ok_or(CoreError::UnsupportedEnvironment)?;

        let last = match self.last {
            Some(t) => t,
            None => {
                // Tick before start: prime only, like the first frame.
                self.last = Some(now);
                return Ok(0);
            }
        };
        self.last = Some(now);

        let elapsed = ((now - last) as f32).clamp(0.0, self.max_frame);
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step {
            run(self.step).map_err(CoreError::Step)?;
            self.accumulator -= self.step;
            self.total_time += self.step as f64;
            self.step_count += 1;
            steps += 1;
        }
        Ok(steps)
    }
}

impl Default for FixedTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scriptable clock for deterministic tests.
    struct ManualClock {
        now: f64,
        alive: bool,
    }

    impl ManualClock {
        fn new() -> Self {
            Self { now: 0.0, alive: true }
        }

        fn advance(&mut self, dt: f64) {
            self.now += dt;
        }
    }

    impl Clock for ManualClock {
        fn sample(&mut self) -> Option<f64> {
            self.alive.then_some(self.now)
        }
    }

    #[test]
    fn test_dead_clock_is_unsupported_environment() {
        let mut clock = ManualClock::new();
        clock.alive = false;
        let mut timer = FixedTimer::default();
        assert_eq!(
            timer.start(&mut clock).unwrap_err(),
            CoreError::UnsupportedEnvironment
        );
    }

    #[test]
    fn test_first_tick_runs_zero_steps() {
        let mut clock = ManualClock::new();
        clock.now = 1000.0; // host has been up a while
        let mut timer = FixedTimer::default();
        timer.start(&mut clock).unwrap();

        // No elapsed time since start: nothing to simulate.
        let steps = timer.tick(&mut clock, |_| Ok(())).unwrap();
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_no_drift_over_identical_frames() {
        let step = FixedTimer::DEFAULT_STEP;
        let mut clock = ManualClock::new();
        let mut timer = FixedTimer::new(step);
        timer.start(&mut clock).unwrap();

        let n = 600;
        let mut total_steps = 0;
        for _ in 0..n {
            clock.advance(step as f64);
            total_steps += timer.tick(&mut clock, |_| Ok(())).unwrap();
        }

        assert_eq!(total_steps, n);
        assert_eq!(timer.step_count(), n as u64);
        let expected = n as f64 * step as f64;
        assert!((timer.total_time() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_slow_frame_produces_multiple_steps() {
        let mut clock = ManualClock::new();
        let mut timer = FixedTimer::new(1.0 / 60.0);
        timer.start(&mut clock).unwrap();

        // One 55ms frame at a 16.6ms step: three whole steps, with
        // enough slack that f32 rounding of the step cannot flip the
        // count either way.
        clock.advance(0.055);
        let steps = timer.tick(&mut clock, |_| Ok(())).unwrap();
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut clock = ManualClock::new();
        let mut timer = FixedTimer::new(1.0 / 60.0).with_max_frame(0.25);
        timer.start(&mut clock).unwrap();

        // Tab backgrounded for a minute.
        clock.advance(60.0);
        let steps = timer.tick(&mut clock, |_| Ok(())).unwrap();
        // At most 0.25s worth of catch-up.
        assert!(steps <= 15);
        assert!(timer.total_time() <= 0.25 + 1e-6);
    }

    #[test]
    fn test_step_failure_aborts_tick() {
        let mut clock = ManualClock::new();
        let mut timer = FixedTimer::new(1.0 / 60.0);
        timer.start(&mut clock).unwrap();

        clock.advance(0.050); // would be 3 steps
        let mut ran = 0;
        let result = timer.tick(&mut clock, |_| {
            ran += 1;
            if ran == 2 {
                Err(StepError::InvariantViolation("test".into()))
            } else {
                Ok(())
            }
        });

        assert!(result.is_err());
        assert_eq!(ran, 2);
        // Only completed steps counted.
        assert_eq!(timer.step_count(), 1);
    }

    #[test]
    fn test_fractional_frames_accumulate() {
        let mut clock = ManualClock::new();
        let mut timer = FixedTimer::new(1.0 / 60.0);
        timer.start(&mut clock).unwrap();

        // Two 10ms frames: first runs nothing, second crosses 16.6ms.
        clock.advance(0.010);
        assert_eq!(timer.tick(&mut clock, |_| Ok(())).unwrap(), 0);
        clock.advance(0.010);
        assert_eq!(timer.tick(&mut clock, |_| Ok(())).unwrap(), 1);
    }
}
