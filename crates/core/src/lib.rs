//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules, the board state machine, and the
//! fixed-timestep loop that drives them. It has **no dependencies** on the
//! terminal or on input capture, making it:
//!
//! - **Deterministic**: Same seed and same tick sequence produce identical boards
//! - **Testable**: The clock is injectable and drawing goes through a trait
//! - **Portable**: Runs behind a terminal renderer or fully headless
//!
//! # Module Structure
//!
//! - [`matcher`]: Run detection over a kind snapshot (rows, then columns)
//! - [`gravity`]: Per-column stable compaction and refill
//! - [`gesture`]: Board geometry and swipe classification
//! - [`board`]: Tiles, animation, and the Idle / Swapping / Resolving machine
//! - [`scheduler`]: Fixed-step accumulator, catch-up bound, render skipping
//! - [`state`]: State lifecycle and the application shell
//! - [`score`]: Score total and change notifications
//! - [`rng`]: Seeded tile dealer
//!
//! # Game Rules
//!
//! - **Board**: 8x8, six tile kinds, never starts with a run of three
//! - **Swap**: Swipe a tile more than 20 units toward an orthogonal neighbour
//! - **Match**: Three or more equal kinds in a row or column; a swap that makes
//!   none is undone once the animation finishes
//! - **Scoring**: 100 points per matched cell per resolve pass
//! - **Cascade**: Refills are unfiltered and keep resolving until the board is quiet
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{BoardGeometry, BoardSimulation};
//! use tui_match3_core::types::SimulationTime;
//! use tui_match3_core::types::DEFAULT_FIXED_STEP;
//!
//! let mut board = BoardSimulation::new(BoardGeometry::new(0.0, 0.0, 50.0), 12345);
//! let time = SimulationTime {
//!     elapsed_time: DEFAULT_FIXED_STEP,
//!     ..Default::default()
//! };
//! board.update(&time);
//! assert_eq!(board.score(), 0);
//! assert!(board.accepts_input());
//! ```

pub mod board;
pub mod canvas;
pub mod config;
pub mod error;
pub mod gesture;
pub mod gravity;
pub mod grid;
pub mod hint;
pub mod matcher;
pub mod rng;
pub mod scheduler;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tile;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{BoardPhase, BoardSimulation};
pub use canvas::{Canvas, DrawOp, Drawable, RecordingCanvas};
pub use config::{ScreenSize, SimulationConfig};
pub use error::ConfigError;
pub use gesture::{BoardGeometry, GestureRouter};
pub use gravity::compact;
pub use grid::{Grid, KindGrid};
pub use hint::find_hint;
pub use matcher::{find_matches, MatchSet};
pub use rng::{SimpleRng, TileDealer};
pub use scheduler::{Clock, ManualClock, SystemClock, TickOutcome, TimestepScheduler};
pub use score::{ScoreNotifier, SubscriptionId};
pub use snapshot::BoardSnapshot;
pub use state::{AppContext, Application, GameState, MatchThreeState};
pub use tile::Tile;
