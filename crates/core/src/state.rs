//! State lifecycle and the application shell
//!
//! A [`GameState`] sees `enter`, then any interleaving of `update`/`draw`, then
//! `exit`. The [`Application`] owns the current state and the scheduler and is
//! handed everything it needs through an [`AppContext`]; nothing is global.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};

use crate::board::BoardSimulation;
use crate::canvas::{Canvas, Drawable};
use crate::config::{ScreenSize, SimulationConfig};
use crate::error::Result;
use crate::gesture::BoardGeometry;
use crate::scheduler::{Clock, TickOutcome, TimestepScheduler};
use crate::score::SubscriptionId;
use crate::snapshot::BoardSnapshot;
use crate::types::{GestureEvent, Rgba, SimulationTime};

/// Host facts shared with every state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppContext {
    pub config: SimulationConfig,
    pub screen: ScreenSize,
    pub seed: u32,
}

impl AppContext {
    /// Validated context
    pub fn new(config: SimulationConfig, screen: ScreenSize, seed: u32) -> Result<Self> {
        Ok(Self {
            config: config.validate()?,
            screen: screen.validate()?,
            seed,
        })
    }

    /// Board placement for the current screen
    pub fn board_geometry(&self) -> BoardGeometry {
        BoardGeometry::for_screen(self.screen)
    }
}

/// One screen of the application
pub trait GameState {
    fn enter(&mut self, ctx: &AppContext);
    fn update(&mut self, time: &SimulationTime);
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &AppContext);
    fn exit(&mut self);

    /// Pointer or key intent, already on the owner thread
    fn handle_gesture(&mut self, _event: &GestureEvent) {}

    /// The screen size in `ctx` changed
    fn resize(&mut self, _ctx: &AppContext) {}

    /// Board state, for states that have one
    fn snapshot(&self) -> Option<BoardSnapshot> {
        None
    }
}

const SCREEN_BACKGROUND: Rgba = Rgba::rgb(20, 20, 40);
const TITLE_COLOR: Rgba = Rgba::rgb(255, 255, 255);
const SCORE_COLOR: Rgba = Rgba::rgb(255, 220, 120);
const TITLE: &str = "Match Three";

/// The puzzle screen: a board plus title and score
#[derive(Debug, Default)]
pub struct MatchThreeState {
    board: Option<BoardSimulation>,
    shown_score: Rc<Cell<u32>>,
    subscription: Option<SubscriptionId>,
}

impl MatchThreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> Option<&BoardSimulation> {
        self.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut BoardSimulation> {
        self.board.as_mut()
    }

    /// Score as last reported by the board's notification
    pub fn shown_score(&self) -> u32 {
        self.shown_score.get()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}

impl GameState for MatchThreeState {
    fn enter(&mut self, ctx: &AppContext) {
        let mut board = BoardSimulation::new(ctx.board_geometry(), ctx.seed);
        let shown = Rc::clone(&self.shown_score);
        shown.set(0);
        self.subscription = Some(board.subscribe(move |score| shown.set(score)));
        self.board = Some(board);
        info!("entered match-three screen (seed {})", ctx.seed);
    }

    fn update(&mut self, time: &SimulationTime) {
        if let Some(board) = self.board.as_mut() {
            board.update(time);
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, ctx: &AppContext) {
        let w = ctx.screen.width;
        let h = ctx.screen.height;

        canvas.set_fill_color(SCREEN_BACKGROUND);
        canvas.fill_rect(0.0, 0.0, w, h);

        canvas.set_fill_color(TITLE_COLOR);
        canvas.set_font("Arial", 32.0);
        let title_width = TITLE.chars().count() as f32 * 18.0;
        canvas.text(TITLE, (w - title_width) / 2.0, h * 0.08);

        canvas.set_fill_color(SCORE_COLOR);
        canvas.set_font("Arial", 24.0);
        canvas.text(&format!("Score: {}", self.shown_score.get()), 20.0, h - 40.0);

        if let Some(board) = &self.board {
            board.draw(canvas);
        }
    }

    fn exit(&mut self) {
        if let (Some(board), Some(id)) = (self.board.as_mut(), self.subscription.take()) {
            board.unsubscribe(id);
        }
        self.board = None;
        debug!("left match-three screen");
    }

    fn handle_gesture(&mut self, event: &GestureEvent) {
        if let Some(board) = self.board.as_mut() {
            board.handle_gesture(event);
        }
    }

    fn resize(&mut self, ctx: &AppContext) {
        if let Some(board) = self.board.as_mut() {
            board.relayout(ctx.board_geometry());
        }
    }

    fn snapshot(&self) -> Option<BoardSnapshot> {
        self.board.as_ref().map(BoardSimulation::snapshot)
    }
}

/// Owns the current state and drives it from the scheduler
pub struct Application {
    ctx: AppContext,
    scheduler: TimestepScheduler,
    state: Option<Box<dyn GameState>>,
}

impl Application {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            scheduler: TimestepScheduler::new(ctx.config),
            ctx,
            state: None,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &TimestepScheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn state(&self) -> Option<&dyn GameState> {
        self.state.as_deref()
    }

    /// Enter `state` and start the loop. Does nothing if already running.
    pub fn run(&mut self, mut state: Box<dyn GameState>) -> bool {
        if self.scheduler.is_running() {
            return false;
        }
        state.enter(&self.ctx);
        self.state = Some(state);
        self.scheduler.start();
        true
    }

    /// Exit the current state (if any) and enter `state`.
    pub fn change_state(&mut self, mut state: Box<dyn GameState>) {
        if let Some(mut old) = self.state.take() {
            old.exit();
        }
        state.enter(&self.ctx);
        self.state = Some(state);
    }

    /// Feed a synthetic real delta.
    pub fn tick(&mut self, real_delta: Duration) -> TickOutcome {
        let state = &mut self.state;
        self.scheduler.tick(real_delta, |time| {
            if let Some(state) = state.as_mut() {
                state.update(time);
            }
        })
    }

    /// Measure the real delta from `clock`.
    pub fn poll(&mut self, clock: &impl Clock) -> TickOutcome {
        let state = &mut self.state;
        self.scheduler.poll(clock, |time| {
            if let Some(state) = state.as_mut() {
                state.update(time);
            }
        })
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(state) = &self.state {
            state.draw(canvas, &self.ctx);
        }
    }

    pub fn dispatch_gesture(&mut self, event: &GestureEvent) {
        if let Some(state) = self.state.as_mut() {
            state.handle_gesture(event);
        }
    }

    /// Adopt a new screen size and let the state re-layout.
    pub fn resize(&mut self, screen: ScreenSize) -> Result<()> {
        self.ctx.screen = screen.validate()?;
        if let Some(state) = self.state.as_mut() {
            state.resize(&self.ctx);
        }
        Ok(())
    }

    /// Stop the loop and exit the current state. Idempotent.
    pub fn stop(&mut self) -> bool {
        let was_running = self.scheduler.stop();
        let had_state = match self.state.take() {
            Some(mut state) => {
                state.exit();
                true
            }
            None => false,
        };
        was_running || had_state
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.stop();
    }
}
