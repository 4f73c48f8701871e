//! Headless autoplay.
//!
//! Drives the full application shell against a [`ManualClock`] with no
//! terminal attached. Whenever the board is idle it plays the first hinted
//! swap through synthetic press/release gestures, exactly as a pointer would.

use log::{debug, info};
use serde::Serialize;

use crate::core::{
    find_hint, AppContext, Application, BoardGeometry, BoardSnapshot, ManualClock,
    MatchThreeState,
};
use crate::types::{CellPos, GestureEvent, SWIPE_THRESHOLD};

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct AutoplayReport {
    pub ticks: u32,
    pub updates: u64,
    pub swipes: u32,
    pub board: BoardSnapshot,
    pub rows: Vec<String>,
}

/// Run `ticks` fixed-step ticks from a fresh board seeded by `ctx.seed`.
pub fn run_headless(ctx: AppContext, ticks: u32) -> AutoplayReport {
    let clock = ManualClock::new();
    let geometry = ctx.board_geometry();
    let step = ctx.config.fixed_step;

    let mut app = Application::new(ctx);
    app.run(Box::new(MatchThreeState::new()));
    app.poll(&clock);

    let mut updates = 0u64;
    let mut swipes = 0u32;

    for _ in 0..ticks {
        if let Some(snapshot) = current_snapshot(&app) {
            if snapshot.is_idle() {
                if let Some((a, b)) = find_hint(&snapshot.board) {
                    swipe(&mut app, &geometry, a, b);
                    swipes += 1;
                    debug!("autoplay swipe {:?} -> {:?}", a, b);
                }
            }
        }
        clock.advance(step);
        updates += app.poll(&clock).updates as u64;
    }

    let board = current_snapshot(&app).unwrap_or_default();
    info!(
        "headless run: {} ticks, {} swipes, score {}",
        ticks, swipes, board.score
    );
    AutoplayReport {
        ticks,
        updates,
        swipes,
        rows: board.rows(),
        board,
    }
}

fn current_snapshot(app: &Application) -> Option<BoardSnapshot> {
    app.state().and_then(|state| state.snapshot())
}

/// Press on `from` and release far enough toward `to` to clear the threshold.
fn swipe(app: &mut Application, geometry: &BoardGeometry, from: CellPos, to: CellPos) {
    let (x, y) = geometry.cell_center(from);
    let reach = geometry.cell_size.max(SWIPE_THRESHOLD + 1.0);
    let dcol = to.col as f32 - from.col as f32;
    let drow = to.row as f32 - from.row as f32;
    app.dispatch_gesture(&GestureEvent::press(x, y));
    app.dispatch_gesture(&GestureEvent::release(x + dcol * reach, y + drow * reach));
}
