//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond small conversions, making
//! them usable in any context (simulation core, input mapping, terminal rendering).
//!
//! # Board Dimensions
//!
//! The puzzle board is a fixed 8x8 grid addressed by `(row, col)`:
//!
//! - **Rows**: 0..8, top to bottom
//! - **Columns**: 0..8, left to right
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FIXED_STEP` | 1/30 s | Virtual simulation step |
//! | `DEFAULT_MAX_FRAME_SKIP` | 5 | Max extra catch-up updates per tick |
//! | `ANOMALOUS_DELTA` | 0.3 s | Real deltas above this are clamped to one step |
//!
//! # Animation and Gesture Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `EASE_SPEED` | 5.0 | Fraction-per-second a tile closes toward its target |
//! | `SNAP_EPSILON` | 0.5 | Distance below which a tile snaps onto its target |
//! | `SWIPE_THRESHOLD` | 20.0 | Minimum dominant-axis travel for a swipe |
//! | `TILE_SCALE` | 0.8 | Tile edge as a fraction of the cell edge |
//! | `UNITS_PER_COLUMN` | 10.0 | Screen units per terminal column |
//! | `UNITS_PER_ROW` | 20.0 | Screen units per terminal row |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{CellPos, Direction, TileKind, BOARD_SIZE};
//!
//! let kind = TileKind::from_str("purple").unwrap();
//! assert_eq!(kind, TileKind::Purple);
//!
//! let pos = CellPos::new(0, 0);
//! assert_eq!(pos.step(Direction::Right), Some(CellPos::new(0, 1)));
//! assert_eq!(pos.step(Direction::Up), None);
//!
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use std::time::Duration;

use serde::Serialize;

/// Board edge length in cells (8x8)
pub const BOARD_SIZE: usize = 8;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded per matched cell
pub const POINTS_PER_TILE: u32 = 100;

/// Default virtual step (1/30 s, to the nanosecond)
pub const DEFAULT_FIXED_STEP: Duration = Duration::from_nanos(33_333_333);

/// Default bound on catch-up updates beyond the first per tick
pub const DEFAULT_MAX_FRAME_SKIP: u32 = 5;

/// Real elapsed time above which a tick is treated as anomalous
pub const ANOMALOUS_DELTA: Duration = Duration::from_millis(300);

/// Easing speed for tile animation
pub const EASE_SPEED: f32 = 5.0;

/// Snap/convergence distance on each axis
pub const SNAP_EPSILON: f32 = 0.5;

/// Minimum dominant-axis displacement for a swipe
pub const SWIPE_THRESHOLD: f32 = 20.0;

/// Tile edge relative to cell edge
pub const TILE_SCALE: f32 = 0.8;

/// Screen units spanned by one terminal column
pub const UNITS_PER_COLUMN: f32 = 10.0;

/// Screen units spanned by one terminal row (cells are about twice as tall as wide)
pub const UNITS_PER_ROW: f32 = 20.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert!((DEFAULT_FIXED_STEP.as_secs_f64() - 1.0 / 30.0).abs() < 1e-8);
        assert_eq!(DEFAULT_MAX_FRAME_SKIP, 5);
        assert_eq!(ANOMALOUS_DELTA, Duration::from_millis(300));
    }

    #[test]
    fn cell_pos_steps_stay_in_bounds() {
        let corner = CellPos::new(BOARD_SIZE - 1, BOARD_SIZE - 1);
        assert_eq!(corner.step(Direction::Down), None);
        assert_eq!(corner.step(Direction::Right), None);
        assert_eq!(corner.step(Direction::Up), Some(CellPos::new(6, 7)));
        assert_eq!(corner.step(Direction::Left), Some(CellPos::new(7, 6)));
    }

    #[test]
    fn cell_pos_index_is_row_major() {
        assert_eq!(CellPos::new(0, 0).index(), 0);
        assert_eq!(CellPos::new(1, 0).index(), BOARD_SIZE);
        assert_eq!(CellPos::from_index(BOARD_SIZE + 3), CellPos::new(1, 3));
    }

    #[test]
    fn tile_kind_names_roundtrip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TileKind::from_str("teal"), None);
    }
}

/// The six tile kinds
///
/// Every kind has a distinct fill color when drawn:
/// - **Red**, **Blue**, **Green**, **Yellow**, **Purple**, **Orange**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileKind {
    /// All kinds in declaration order
    pub const ALL: [TileKind; 6] = [
        TileKind::Red,
        TileKind::Blue,
        TileKind::Green,
        TileKind::Yellow,
        TileKind::Purple,
        TileKind::Orange,
    ];

    /// Number of distinct kinds
    pub const COUNT: usize = Self::ALL.len();

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("RED"), Some(TileKind::Red));
    /// assert_eq!(TileKind::from_str("o"), Some(TileKind::Orange));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(TileKind::Red),
            "blue" | "b" => Some(TileKind::Blue),
            "green" | "g" => Some(TileKind::Green),
            "yellow" | "y" => Some(TileKind::Yellow),
            "purple" | "p" => Some(TileKind::Purple),
            "orange" | "o" => Some(TileKind::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Blue => "blue",
            TileKind::Green => "green",
            TileKind::Yellow => "yellow",
            TileKind::Purple => "purple",
            TileKind::Orange => "orange",
        }
    }

    /// Single-letter tag, handy for compact board dumps
    pub fn letter(&self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Blue => 'B',
            TileKind::Green => 'G',
            TileKind::Yellow => 'Y',
            TileKind::Purple => 'P',
            TileKind::Orange => 'O',
        }
    }
}

/// 4-channel 0-255 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A board cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat row-major index
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`CellPos::index`]
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    /// Whether both coordinates are on the board
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Neighbouring cell one step in `dir`, or `None` off the board
    pub fn step(&self, dir: Direction) -> Option<CellPos> {
        let (dr, dc) = dir.delta();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row >= BOARD_SIZE as isize || col >= BOARD_SIZE as isize {
            return None;
        }
        Some(CellPos::new(row as usize, col as usize))
    }
}

/// Unit swipe direction; exactly one axis moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(row delta, col delta)`
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Kind of pointer/keyboard event produced by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Press,
    Move,
    Release,
    Key,
}

/// Raw gesture event in screen units
///
/// Pointer coordinates share the unit system of the board geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub x: f32,
    pub y: f32,
    pub pointer_id: i32,
    pub key_code: Option<String>,
}

impl GestureEvent {
    pub fn press(x: f32, y: f32) -> Self {
        Self::pointer(GestureKind::Press, x, y)
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        Self::pointer(GestureKind::Move, x, y)
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self::pointer(GestureKind::Release, x, y)
    }

    pub fn key(code: impl Into<String>) -> Self {
        Self {
            kind: GestureKind::Key,
            x: 0.0,
            y: 0.0,
            pointer_id: 0,
            key_code: Some(code.into()),
        }
    }

    fn pointer(kind: GestureKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            pointer_id: 0,
            key_code: None,
        }
    }
}

/// Simulation clock reading handed to each fixed update
///
/// `elapsed_time` is always the fixed step; `real_elapsed_time` is the
/// (clamped) wall-clock delta of the tick the update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationTime {
    pub total_time: Duration,
    pub elapsed_time: Duration,
    pub real_elapsed_time: Duration,
    pub skipped_render_frames: u32,
    pub is_lagging: bool,
}

impl SimulationTime {
    /// Fixed step in seconds, the unit animation code works in
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_time.as_secs_f32()
    }

    pub fn total_secs(&self) -> f64 {
        self.total_time.as_secs_f64()
    }
}
