//! Fixed-timestep scheduler
//!
//! Real elapsed time is accumulated and consumed in constant virtual steps, so
//! the simulation never sees a variable delta. Each tick runs at most
//! `max_frame_skip + 1` updates; when it has to run more than one, the tick is
//! flagged as lagging and up to that many following redraws are suppressed.
//!
//! Time is tracked as integer nanoseconds (`Duration`), so a tick of exactly
//! `k` steps performs exactly `k` updates.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_match3_core::{SimulationConfig, TimestepScheduler};
//!
//! let config = SimulationConfig::default();
//! let mut scheduler = TimestepScheduler::new(config);
//! scheduler.start();
//!
//! let mut updates = 0;
//! let outcome = scheduler.tick(config.fixed_step * 3, |_| updates += 1);
//! assert_eq!(updates, 3);
//! assert!(outcome.time.is_lagging);
//! assert_eq!(outcome.time.skipped_render_frames, 2);
//! ```

use std::cell::Cell;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::SimulationConfig;
use crate::types::SimulationTime;

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
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
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to; for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Fixed updates performed
    pub updates: u32,
    /// Whether the host should draw after this tick
    pub redraw: bool,
    /// Clock reading of the tick (the last one handed to an update, if any)
    pub time: SimulationTime,
}

#[derive(Debug, Clone)]
pub struct TimestepScheduler {
    config: SimulationConfig,
    accumulator: Duration,
    total: Duration,
    render_skip: u32,
    running: bool,
    last_now: Option<Duration>,
}

impl TimestepScheduler {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            accumulator: Duration::ZERO,
            total: Duration::ZERO,
            render_skip: 0,
            running: false,
            last_now: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total virtual time consumed so far
    pub fn total_time(&self) -> Duration {
        self.total
    }

    /// Unconsumed real time
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Reset accumulator, total time, and lag counters.
    pub fn initialize(&mut self) {
        self.accumulator = Duration::ZERO;
        self.total = Duration::ZERO;
        self.render_skip = 0;
        self.last_now = None;
    }

    /// Reset and begin accepting ticks. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.initialize();
        self.running = true;
        true
    }

    /// Stop accepting ticks. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)` after a
    /// tick that was not capped. Renderers may use it to interpolate.
    pub fn interpolation_alpha(&self) -> f32 {
        let step = self.config.fixed_step.as_nanos();
        if step == 0 {
            return 0.0;
        }
        (self.accumulator.as_nanos() as f64 / step as f64) as f32
    }

    /// Measure the real delta from `clock` and [`tick`](Self::tick).
    ///
    /// The first poll after [`start`](Self::start) only records the time.
    pub fn poll(
        &mut self,
        clock: &impl Clock,
        update: impl FnMut(&SimulationTime),
    ) -> TickOutcome {
        let now = clock.now();
        let delta = match self.last_now {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        if self.running {
            self.last_now = Some(now);
        }
        self.tick(delta, update)
    }

    /// Feed one real elapsed duration and run the resulting fixed updates.
    pub fn tick(
        &mut self,
        real_delta: Duration,
        mut update: impl FnMut(&SimulationTime),
    ) -> TickOutcome {
        if !self.running {
            return TickOutcome {
                updates: 0,
                redraw: false,
                time: self.time_at(Duration::ZERO, 0),
            };
        }

        let step = self.config.fixed_step;
        let mut delta = real_delta;
        if delta > self.config.anomalous_delta {
            warn!(
                "real delta {:?} above {:?}, clamped to one step",
                delta, self.config.anomalous_delta
            );
            delta = step;
        }
        self.accumulator += delta;

        let cap = self.config.max_frame_skip + 1;
        let due = self.accumulator.as_nanos() / step.as_nanos().max(1);
        let updates = due.min(cap as u128) as u32;
        let skipped = if updates > 1 {
            (updates - 1).min(self.config.max_frame_skip)
        } else {
            0
        };
        if updates > 1 {
            debug!("lagging: {} updates this tick, skipping {} draw(s)", updates, skipped);
        }

        let mut time = self.time_at(delta, skipped);
        for _ in 0..updates {
            self.total += step;
            self.accumulator -= step;
            time.total_time = self.total;
            update(&time);
        }

        let redraw = if self.render_skip < skipped {
            self.render_skip += 1;
            false
        } else {
            self.render_skip = 0;
            true
        };

        TickOutcome {
            updates,
            redraw,
            time,
        }
    }

    fn time_at(&self, real_delta: Duration, skipped: u32) -> SimulationTime {
        SimulationTime {
            total_time: self.total,
            elapsed_time: self.config.fixed_step,
            real_elapsed_time: real_delta,
            skipped_render_frames: skipped,
            is_lagging: skipped > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: SimulationConfig) -> TimestepScheduler {
        let mut s = TimestepScheduler::new(config);
        assert!(s.start());
        s
    }

    #[test]
    fn test_single_step_tick() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let mut seen = Vec::new();
        let out = s.tick(config.fixed_step, |t| seen.push(*t));
        assert_eq!(out.updates, 1);
        assert!(out.redraw);
        assert!(!out.time.is_lagging);
        assert_eq!(seen[0].elapsed_time, config.fixed_step);
        assert_eq!(seen[0].total_time, config.fixed_step);
    }

    #[test]
    fn test_lagging_tick_runs_three_updates() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let mut seen = Vec::new();
        let out = s.tick(config.fixed_step * 3, |t| seen.push(*t));
        assert_eq!(out.updates, 3);
        assert!(out.time.is_lagging);
        assert_eq!(out.time.skipped_render_frames, 2);
        assert!(seen.iter().all(|t| t.elapsed_time == config.fixed_step));
        assert!(seen.iter().all(|t| t.is_lagging));
        assert_eq!(s.total_time(), config.fixed_step * 3);
    }

    #[test]
    fn test_anomalous_delta_is_clamped() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let mut count = 0;
        let out = s.tick(Duration::from_secs(1), |t| {
            assert_eq!(t.elapsed_time, config.fixed_step);
            count += 1;
        });
        assert_eq!(count, 1);
        assert_eq!(out.time.real_elapsed_time, config.fixed_step);
        assert!(!out.time.is_lagging);
    }

    #[test]
    fn test_updates_capped_at_frame_skip_plus_one() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        // 0.29s is below the clamp but worth 8 steps.
        let out = s.tick(Duration::from_millis(290), |_| {});
        assert_eq!(out.updates, config.max_frame_skip + 1);
        assert_eq!(out.time.skipped_render_frames, config.max_frame_skip);
        assert!(s.accumulator() >= config.fixed_step);
    }

    #[test]
    fn test_render_skip_suppresses_following_redraws() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let out = s.tick(config.fixed_step * 3, |_| {});
        assert!(!out.redraw);
        let out = s.tick(config.fixed_step * 3, |_| {});
        assert!(!out.redraw);
        let out = s.tick(config.fixed_step * 3, |_| {});
        assert!(out.redraw);
    }

    #[test]
    fn test_partial_step_accumulates() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let half = config.fixed_step / 2;
        assert_eq!(s.tick(half, |_| {}).updates, 0);
        assert!((s.interpolation_alpha() - 0.5).abs() < 1e-6);
        assert_eq!(s.tick(config.fixed_step - half, |_| {}).updates, 1);
        assert_eq!(s.interpolation_alpha(), 0.0);
    }

    #[test]
    fn test_stopped_scheduler_is_inert() {
        let config = SimulationConfig::default();
        let mut s = TimestepScheduler::new(config);
        let out = s.tick(config.fixed_step, |_| panic!("update while stopped"));
        assert_eq!(out.updates, 0);
        assert!(!out.redraw);

        assert!(s.start());
        assert!(!s.start());
        assert!(s.stop());
        assert!(!s.stop());
    }

    #[test]
    fn test_poll_measures_from_clock() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(10));
        assert_eq!(s.poll(&clock, |_| {}).updates, 0);
        clock.advance(config.fixed_step * 2);
        assert_eq!(s.poll(&clock, |_| {}).updates, 2);
    }

    #[test]
    fn test_start_resets_counters() {
        let config = SimulationConfig::default();
        let mut s = started(config);
        s.tick(config.fixed_step * 2, |_| {});
        s.stop();
        s.start();
        assert_eq!(s.total_time(), Duration::ZERO);
        assert_eq!(s.accumulator(), Duration::ZERO);
    }
}
