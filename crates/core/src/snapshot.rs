use serde::Serialize;

use crate::board::BoardPhase;
use crate::grid::KindGrid;
use crate::types::{TileKind, BOARD_SIZE};

/// Plain copy of the observable board state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub board: KindGrid,
    pub phase: BoardPhase,
    /// Every tile has reached its cell
    pub settled: bool,
    pub score: u32,
    pub resolve_passes: u32,
    pub cascade_depth: u32,
    pub seed: u32,
}

impl BoardSnapshot {
    /// One string of kind letters per row
    pub fn rows(&self) -> Vec<String> {
        self.board
            .iter()
            .map(|row| row.iter().map(TileKind::letter).collect())
            .collect()
    }

    /// Idle with nothing moving, so a swipe would be accepted
    pub fn is_idle(&self) -> bool {
        self.phase == BoardPhase::Idle && self.settled
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            board: [[TileKind::Red; BOARD_SIZE]; BOARD_SIZE],
            phase: BoardPhase::Idle,
            settled: true,
            score: 0,
            resolve_passes: 0,
            cascade_depth: 0,
            seed: 0,
        }
    }
}
