//! Board simulation - grid, tile animation, and the resolve state machine
//!
//! A [`BoardSimulation`] is advanced only by fixed-step [`update`] calls and
//! by gesture intents, both on the owner thread. Every structural change
//! (swap, revert, compaction) waits for the tile animation to converge first:
//!
//! ```text
//! Idle --valid swipe--> Swapping --settled, matches--> Resolving --settled, none--> Idle
//!                          |                              ^    |
//!                          +--settled, no match: revert   +----+ settled, matches (cascade)
//! ```
//!
//! [`update`]: BoardSimulation::update

use arrayvec::ArrayVec;
use log::{debug, info};
use serde::Serialize;

use crate::canvas::{Canvas, Drawable};
use crate::gesture::{BoardGeometry, GestureRouter};
use crate::gravity::{compact, retarget};
use crate::grid::{invariant_violation, Grid, KindGrid};
use crate::hint::find_hint;
use crate::matcher::find_matches;
use crate::rng::TileDealer;
use crate::score::{ScoreNotifier, SubscriptionId};
use crate::snapshot::BoardSnapshot;
use crate::tile::Tile;
use crate::types::{
    CellPos, GestureEvent, GestureKind, Rgba, SimulationTime, TileKind, BOARD_SIZE, CELL_COUNT,
};

// Any cell has at most two conflicting kinds per axis, so this many kinds
// always leaves a legal choice and regeneration settles in one pass.
const _: () = assert!(TileKind::COUNT >= 5);

const BOARD_BACKGROUND: Rgba = Rgba::rgb(50, 50, 80);
const GRID_LINE: Rgba = Rgba::rgb(70, 70, 100);
const HINT_OUTLINE: Rgba = Rgba::rgb(255, 255, 255);

/// Upper bound on whole-board regeneration passes during the initial fill
const MAX_REGEN_PASSES: usize = 8;

/// Resolve state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPhase {
    Idle,
    Swapping,
    Resolving,
}

/// A press waiting for its release
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSession {
    start_x: f32,
    start_y: f32,
    cell: CellPos,
}

#[derive(Debug)]
pub struct BoardSimulation {
    grid: Grid,
    router: GestureRouter,
    dealer: TileDealer,
    seed: u32,
    phase: BoardPhase,
    session: Option<GestureSession>,
    pending_swap: Option<(CellPos, CellPos)>,
    score: ScoreNotifier,
    resolve_passes: u32,
    cascade_depth: u32,
    hint_visible: bool,
}

impl BoardSimulation {
    /// Fresh board with no runs of three, every tile resting on its cell
    pub fn new(geometry: BoardGeometry, seed: u32) -> Self {
        let mut dealer = TileDealer::new(seed);
        let kinds = initial_kinds(&mut dealer);
        Self::with_parts(geometry, kinds, dealer, seed)
    }

    /// Board laid out exactly as `kinds`; runs already present are left for
    /// the next resolve pass. `seed` drives refills.
    pub fn from_kinds(geometry: BoardGeometry, kinds: KindGrid, seed: u32) -> Self {
        Self::with_parts(geometry, kinds, TileDealer::new(seed), seed)
    }

    fn with_parts(geometry: BoardGeometry, kinds: KindGrid, dealer: TileDealer, seed: u32) -> Self {
        Self {
            grid: build_grid(&kinds, &geometry),
            router: GestureRouter::new(geometry),
            dealer,
            seed,
            phase: BoardPhase::Idle,
            session: None,
            pending_swap: None,
            score: ScoreNotifier::new(),
            resolve_passes: 0,
            cascade_depth: 0,
            hint_visible: false,
        }
    }

    // ===== Accessors =====

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn kinds(&self) -> KindGrid {
        self.grid.kinds()
    }

    pub fn geometry(&self) -> &BoardGeometry {
        self.router.geometry()
    }

    pub fn router(&self) -> &GestureRouter {
        &self.router
    }

    /// Resolve passes that removed at least one tile since the board was built
    pub fn resolve_passes(&self) -> u32 {
        self.resolve_passes
    }

    /// Consecutive matching passes since the last user swap
    pub fn cascade_depth(&self) -> u32 {
        self.cascade_depth
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Every tile sits within epsilon of its target
    pub fn is_settled(&self) -> bool {
        self.grid.tiles().all(Tile::is_settled)
    }

    /// Whether a new gesture would be acted on right now
    pub fn accepts_input(&self) -> bool {
        self.phase == BoardPhase::Idle && self.is_settled()
    }

    /// Suggested swap for the current layout
    pub fn hint(&self) -> Option<(CellPos, CellPos)> {
        find_hint(&self.grid.kinds())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.grid.kinds(),
            phase: self.phase,
            settled: self.is_settled(),
            score: self.score.score(),
            resolve_passes: self.resolve_passes,
            cascade_depth: self.cascade_depth,
            seed: self.seed,
        }
    }

    // ===== Score notifications =====

    pub fn subscribe(&mut self, listener: impl FnMut(u32) + 'static) -> SubscriptionId {
        self.score.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.score.unsubscribe(id)
    }

    // ===== Simulation =====

    /// Advance one fixed step: ease tiles, then act on convergence.
    pub fn update(&mut self, time: &SimulationTime) {
        let dt = time.elapsed_secs();
        let mut settled = true;
        for tile in self.grid.tiles_mut() {
            tile.update_position(dt);
            settled &= tile.is_settled();
        }
        if !settled {
            return;
        }

        match self.phase {
            BoardPhase::Idle => {}
            BoardPhase::Swapping => {
                let swap = self.pending_swap.take();
                if self.resolve_pass() {
                    self.phase = BoardPhase::Resolving;
                } else {
                    if let Some((a, b)) = swap {
                        debug!("swap {:?} <-> {:?} made no match, reverting", a, b);
                        self.grid.swap(a, b);
                        retarget(&mut self.grid, self.router.geometry());
                        self.grid.assert_consistent();
                    }
                    self.phase = BoardPhase::Idle;
                }
            }
            BoardPhase::Resolving => {
                if !self.resolve_pass() {
                    debug!("cascade settled after {} pass(es)", self.cascade_depth);
                    self.phase = BoardPhase::Idle;
                }
            }
        }
    }

    /// Detect runs, score them, and compact. Returns false (and changes
    /// nothing) when the board has no run of three.
    pub fn resolve_pass(&mut self) -> bool {
        let marked = find_matches(&self.grid.kinds());
        if marked.is_empty() {
            return false;
        }

        for pos in marked.iter() {
            self.grid.tile_mut(pos).matched = true;
        }
        let score = self.score.award(marked.len());
        compact(
            &mut self.grid,
            &marked,
            self.router.geometry(),
            &mut self.dealer,
        );

        self.resolve_passes += 1;
        self.cascade_depth += 1;
        info!(
            "resolved {} cell(s), score {}, cascade depth {}",
            marked.len(),
            score,
            self.cascade_depth
        );
        true
    }

    /// Exchange two adjacent cells and start the swap animation.
    ///
    /// Refused unless the board accepts input and `a`/`b` are orthogonal
    /// neighbours on the board.
    pub fn try_swap(&mut self, a: CellPos, b: CellPos) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !a.in_bounds() || !b.in_bounds() || a.row.abs_diff(b.row) + a.col.abs_diff(b.col) != 1 {
            return false;
        }

        debug!("swap {:?} <-> {:?}", a, b);
        self.grid.swap(a, b);
        retarget(&mut self.grid, self.router.geometry());
        self.grid.assert_consistent();
        self.pending_swap = Some((a, b));
        self.cascade_depth = 0;
        self.phase = BoardPhase::Swapping;
        true
    }

    /// Route one gesture event. Pointer gestures are ignored while the board
    /// is busy; keys are handled in any phase.
    pub fn handle_gesture(&mut self, event: &GestureEvent) {
        match event.kind {
            GestureKind::Press => {
                if !self.accepts_input() {
                    return;
                }
                self.session = self.router.select(event.x, event.y).map(|cell| GestureSession {
                    start_x: event.x,
                    start_y: event.y,
                    cell,
                });
            }
            GestureKind::Move => {}
            GestureKind::Release => {
                let Some(session) = self.session.take() else {
                    return;
                };
                let dx = event.x - session.start_x;
                let dy = event.y - session.start_y;
                if let Some(target) = self.router.swipe_target(session.cell, dx, dy) {
                    self.try_swap(session.cell, target);
                }
            }
            GestureKind::Key => match event.key_code.as_deref() {
                Some("r") | Some("R") => self.reset(),
                Some("h") | Some("H") => self.hint_visible = !self.hint_visible,
                _ => {}
            },
        }
    }

    /// Deal a new board from the continuing random stream and zero the score.
    pub fn reset(&mut self) {
        let seed = self.dealer.seed();
        let mut dealer = TileDealer::new(seed);
        let kinds = initial_kinds(&mut dealer);
        let geometry = *self.router.geometry();

        self.grid = build_grid(&kinds, &geometry);
        self.dealer = dealer;
        self.seed = seed;
        self.phase = BoardPhase::Idle;
        self.session = None;
        self.pending_swap = None;
        self.resolve_passes = 0;
        self.cascade_depth = 0;
        self.score.reset();
        info!("board reset with seed {}", seed);
    }

    /// Move the board to new screen geometry. Resting tiles jump to their new
    /// cells; moving tiles keep animating toward them.
    pub fn relayout(&mut self, geometry: BoardGeometry) {
        self.router = GestureRouter::new(geometry).with_threshold(self.router.threshold());
        self.session = None;
        let size = geometry.tile_size();
        for tile in self.grid.tiles_mut() {
            let resting = tile.is_settled();
            let (x, y) = geometry.cell_center(CellPos::new(tile.row, tile.col));
            tile.size = size;
            tile.set_target(x, y);
            if resting {
                tile.snap();
            }
        }
    }
}

impl Drawable for BoardSimulation {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let g = self.router.geometry();
        let side = g.board_size();

        canvas.set_fill_color(BOARD_BACKGROUND);
        canvas.fill_rect(g.origin_x, g.origin_y, side, side);

        canvas.set_stroke_color(GRID_LINE);
        canvas.set_stroke_width(1.0);
        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * g.cell_size;
            canvas.line(g.origin_x, g.origin_y + offset, g.origin_x + side, g.origin_y + offset);
            canvas.line(g.origin_x + offset, g.origin_y, g.origin_x + offset, g.origin_y + side);
        }

        for tile in self.grid.tiles() {
            tile.draw(canvas);
        }

        if self.hint_visible && self.phase == BoardPhase::Idle {
            if let Some((a, b)) = self.hint() {
                canvas.set_stroke_color(HINT_OUTLINE);
                canvas.set_stroke_width(2.0);
                for pos in [a, b] {
                    let (cx, cy) = g.cell_center(pos);
                    canvas.stroke_circle(cx, cy, g.cell_size * 0.45);
                }
            }
        }
    }
}

/// Tiles resting on the centres of the cells given by `kinds`
fn build_grid(kinds: &KindGrid, geometry: &BoardGeometry) -> Grid {
    let mut grid = Grid::empty();
    let size = geometry.tile_size();
    for (row, line) in kinds.iter().enumerate() {
        for (col, &kind) in line.iter().enumerate() {
            let pos = CellPos::new(row, col);
            let (x, y) = geometry.cell_center(pos);
            grid.place(pos, Tile::new(kind, row, col, size, x, y));
        }
    }
    grid.assert_consistent();
    grid
}

/// Row-major fill that never completes a run with the already placed left or
/// upper pair, followed by regeneration of anything still in a run.
fn initial_kinds(dealer: &mut TileDealer) -> KindGrid {
    let mut kinds = [[TileKind::Red; BOARD_SIZE]; BOARD_SIZE];
    for index in 0..CELL_COUNT {
        let pos = CellPos::from_index(index);
        let excluded = run_conflicts(&kinds, pos, index);
        kinds[pos.row][pos.col] = dealer.deal_excluding(&excluded);
    }

    for _ in 0..MAX_REGEN_PASSES {
        let marked = find_matches(&kinds);
        if marked.is_empty() {
            return kinds;
        }
        debug!("regenerating {} cell(s) of the initial board", marked.len());
        for pos in marked.iter() {
            let excluded = run_conflicts(&kinds, pos, CELL_COUNT);
            kinds[pos.row][pos.col] = dealer.deal_excluding(&excluded);
        }
    }
    if !find_matches(&kinds).is_empty() {
        invariant_violation("initial board still has runs after regeneration");
    }
    kinds
}

/// Kinds that would put `pos` in a run of three with two neighbours on one
/// axis. Only cells with a row-major index below `filled` are considered.
fn run_conflicts(kinds: &KindGrid, pos: CellPos, filled: usize) -> ArrayVec<TileKind, 4> {
    const PAIRS: [(isize, isize); 3] = [(-2, -1), (-1, 1), (1, 2)];

    let kind_at = |row: isize, col: isize| -> Option<TileKind> {
        if row < 0 || col < 0 || row >= BOARD_SIZE as isize || col >= BOARD_SIZE as isize {
            return None;
        }
        let p = CellPos::new(row as usize, col as usize);
        (p.index() < filled).then(|| kinds[p.row][p.col])
    };

    let (r, c) = (pos.row as isize, pos.col as isize);
    let mut out = ArrayVec::new();
    for (a, b) in PAIRS {
        for (first, second) in [
            (kind_at(r, c + a), kind_at(r, c + b)),
            (kind_at(r + a, c), kind_at(r + b, c)),
        ] {
            if let (Some(x), Some(y)) = (first, second) {
                if x == y && !out.contains(&x) && !out.is_full() {
                    out.push(x);
                }
            }
        }
    }
    out
}
