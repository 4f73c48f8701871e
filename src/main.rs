//! Terminal match-three runner (default binary).
//!
//! Owns the terminal and the simulation thread. Input is captured on its own
//! thread and funnelled through a queue that this thread drains between
//! scheduler polls, so the board only ever changes here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use clap::Parser;

use tui_match3::autoplay::run_headless;
use tui_match3::core::{
    AppContext, Application, MatchThreeState, ScreenSize, SimulationConfig, SystemClock,
};
use tui_match3::input::{screen_units, spawn_capture, GestureQueue, InputMessage};
use tui_match3::term::{Cell, FrameBuffer, FrameBufferCanvas, TerminalRenderer};
use tui_match3::types::DEFAULT_MAX_FRAME_SKIP;

/// Screen used by `--headless` (an 80x24 terminal)
const HEADLESS_SCREEN: (u16, u16) = (80, 24);

/// How long the capture thread blocks waiting for a terminal event
const INPUT_POLL: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(name = "tui-match3")]
#[command(about = "Fixed-timestep match-three puzzle for the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Simulation updates per second
    #[arg(long, default_value_t = 30.0)]
    hz: f64,

    /// Extra catch-up updates allowed per tick
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_SKIP)]
    max_frame_skip: u32,

    /// Board seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u32>,

    /// Run this many ticks without a terminal and print the final board as JSON
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimulationConfig::from_hz(cli.hz)?
        .with_max_frame_skip(cli.max_frame_skip)
        .validate()?;
    let seed = cli.seed.unwrap_or_else(seed_from_clock);

    if let Some(ticks) = cli.headless {
        let (w, h) = screen_units(HEADLESS_SCREEN.0, HEADLESS_SCREEN.1);
        let ctx = AppContext::new(config, ScreenSize::new(w, h), seed)?;
        let report = run_headless(ctx, ticks);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: SimulationConfig, seed: u32) -> Result<()> {
    let (cols, rows) = TerminalRenderer::size()?;
    let (w, h) = screen_units(cols, rows);
    let ctx = AppContext::new(config, ScreenSize::new(w, h), seed)?;

    let mut app = Application::new(ctx);
    app.run(Box::new(MatchThreeState::new()));

    let queue = GestureQueue::new();
    let stop = Arc::new(AtomicBool::new(false));
    let capture = spawn_capture(queue.sender(), Arc::clone(&stop), INPUT_POLL);
    let mut fb = FrameBuffer::new(cols, rows);

    let result = drive(term, &mut app, &queue, &capture, &mut fb);

    stop.store(true, Ordering::Relaxed);
    app.stop();
    match capture.join() {
        Ok(captured) => captured?,
        Err(_) => return Err(anyhow!("input capture thread panicked")),
    }
    result
}

/// Owner loop: apply queued input, poll the scheduler, draw on request.
fn drive(
    term: &mut TerminalRenderer,
    app: &mut Application,
    queue: &GestureQueue,
    capture: &JoinHandle<std::io::Result<()>>,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let clock = SystemClock::new();
    let step = app.context().config.fixed_step;

    loop {
        for msg in queue.drain() {
            match msg {
                InputMessage::Quit => return Ok(()),
                InputMessage::Gesture(gesture) => app.dispatch_gesture(&gesture),
                InputMessage::Resize { cols, rows } => {
                    let (w, h) = screen_units(cols, rows);
                    if app.resize(ScreenSize::new(w, h)).is_ok() {
                        fb.resize(cols, rows);
                        term.invalidate();
                    }
                }
            }
        }
        if capture.is_finished() {
            return Ok(());
        }

        let outcome = app.poll(&clock);
        if outcome.redraw {
            fb.clear(Cell::default());
            app.draw(&mut FrameBufferCanvas::new(fb));
            term.draw_swap(fb)?;
        }

        let wait = step.saturating_sub(app.scheduler().accumulator());
        thread::sleep(wait.max(Duration::from_millis(1)));
    }
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
