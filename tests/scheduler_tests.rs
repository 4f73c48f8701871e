//! Scheduler tests - fixed-step catch-up, clamping, and render skipping

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tui_match3::core::{
    AppContext, Application, Canvas, Clock, GameState, ManualClock, ScreenSize, SimulationConfig,
    TimestepScheduler,
};
use tui_match3::types::SimulationTime;

fn running(config: SimulationConfig) -> TimestepScheduler {
    let mut s = TimestepScheduler::new(config);
    s.start();
    s
}

#[test]
fn test_lag_scenario_three_steps_in_one_tick() {
    let config = SimulationConfig::default();
    assert_eq!(config.max_frame_skip, 5);
    let mut s = running(config);

    let mut times = Vec::new();
    let out = s.tick(config.fixed_step * 3, |t| times.push(*t));

    assert_eq!(times.len(), 3);
    assert!(out.time.is_lagging);
    assert_eq!(out.time.skipped_render_frames, 2);
    for (i, t) in times.iter().enumerate() {
        assert_eq!(t.elapsed_time, config.fixed_step);
        assert_eq!(t.total_time, config.fixed_step * (i as u32 + 1));
    }
}

#[test]
fn test_anomalous_second_long_tick_runs_once() {
    let config = SimulationConfig::default();
    let mut s = running(config);
    let mut times = Vec::new();
    s.tick(Duration::from_secs_f64(1.0), |t| times.push(*t));
    assert_eq!(times.len(), 1);
    assert_eq!(times[0].elapsed_time, config.fixed_step);
}

#[test]
fn test_variable_deltas_only_ever_see_fixed_step() {
    let config = SimulationConfig::default();
    let mut s = running(config);
    let deltas_ms = [5, 40, 16, 70, 1, 33, 150, 12];
    let mut total = Duration::ZERO;
    let mut updates = 0;
    for ms in deltas_ms {
        let delta = Duration::from_millis(ms);
        total += delta;
        s.tick(delta, |t| {
            assert_eq!(t.elapsed_time, config.fixed_step);
            updates += 1;
        });
    }
    // Nothing was clamped or capped, so virtual time trails real time by
    // less than one step.
    assert_eq!(s.total_time() + s.accumulator(), total);
    assert!(s.accumulator() < config.fixed_step);
    assert_eq!(s.total_time(), config.fixed_step * updates);
}

#[test]
fn test_custom_frame_skip_bounds_updates() {
    let config = SimulationConfig::default().with_max_frame_skip(1);
    let mut s = running(config);
    let out = s.tick(config.fixed_step * 5, |_| {});
    assert_eq!(out.updates, 2);
    assert_eq!(out.time.skipped_render_frames, 1);
}

#[test]
fn test_manual_clock_drives_poll() {
    let config = SimulationConfig::default();
    let mut s = running(config);
    let clock = ManualClock::new();
    assert_eq!(s.poll(&clock, |_| {}).updates, 0);

    let mut counts = Vec::new();
    for _ in 0..4 {
        clock.advance(config.fixed_step);
        counts.push(s.poll(&clock, |_| {}).updates);
    }
    assert_eq!(counts, vec![1, 1, 1, 1]);
    assert_eq!(clock.now(), config.fixed_step * 4);
}

#[test]
fn test_from_hz_rejects_bad_rates() {
    assert!(SimulationConfig::from_hz(0.0).is_err());
    assert!(SimulationConfig::from_hz(f64::NAN).is_err());
    // A step longer than the anomalous threshold can never advance.
    assert!(SimulationConfig::from_hz(2.0).is_err());
    assert!(SimulationConfig::from_hz(60.0).is_ok());
}

struct Counter {
    updates: Rc<RefCell<u32>>,
}

impl GameState for Counter {
    fn enter(&mut self, _ctx: &AppContext) {}
    fn update(&mut self, _time: &SimulationTime) {
        *self.updates.borrow_mut() += 1;
    }
    fn draw(&self, _canvas: &mut dyn Canvas, _ctx: &AppContext) {}
    fn exit(&mut self) {}
}

#[test]
fn test_application_forwards_ticks_to_state() {
    let ctx = AppContext::new(
        SimulationConfig::default(),
        ScreenSize::new(800.0, 480.0),
        1,
    )
    .unwrap();
    let updates = Rc::new(RefCell::new(0));
    let mut app = Application::new(ctx);
    app.run(Box::new(Counter {
        updates: Rc::clone(&updates),
    }));

    let out = app.tick(ctx.config.fixed_step * 3);
    assert_eq!(out.updates, 3);
    assert!(!out.redraw);
    assert_eq!(*updates.borrow(), 3);

    app.stop();
    let out = app.tick(ctx.config.fixed_step);
    assert_eq!(out.updates, 0);
    assert_eq!(*updates.borrow(), 3);
}
