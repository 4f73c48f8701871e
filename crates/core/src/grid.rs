//! Grid module - owns the tiles of the 8x8 board
//!
//! Uses a flat row-major array; each slot owns at most one [`Tile`].
//! Moving a tile between cells moves the value, never copies it. Outside of a
//! mutation in progress every slot is occupied and each tile's `(row, col)`
//! equals its slot address.

use log::error;

use crate::tile::Tile;
use crate::types::{CellPos, TileKind, BOARD_SIZE, CELL_COUNT};

/// Plain kind snapshot of the board, `[row][col]`
pub type KindGrid = [[TileKind; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [Option<Tile>; CELL_COUNT],
}

/// Report a broken structural invariant and abort.
#[cold]
#[track_caller]
pub(crate) fn invariant_violation(msg: &str) -> ! {
    error!("board invariant violated: {}", msg);
    panic!("board invariant violated: {}", msg);
}

impl Grid {
    /// Grid with every slot vacant (only valid while filling)
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, pos: CellPos) -> Option<&Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.index()].as_ref()
    }

    /// Occupant of `pos`; a vacant or out-of-range slot is a fatal error.
    #[track_caller]
    pub fn tile(&self, pos: CellPos) -> &Tile {
        match self.get(pos) {
            Some(tile) => tile,
            None => invariant_violation(&format!("no tile at {:?}", pos)),
        }
    }

    #[track_caller]
    pub fn tile_mut(&mut self, pos: CellPos) -> &mut Tile {
        if !pos.in_bounds() {
            invariant_violation(&format!("cell {:?} out of range", pos));
        }
        match self.cells[pos.index()].as_mut() {
            Some(tile) => tile,
            None => invariant_violation(&format!("no tile at {:?}", pos)),
        }
    }

    #[track_caller]
    pub fn kind_at(&self, pos: CellPos) -> TileKind {
        self.tile(pos).kind
    }

    /// Put `tile` into `pos`, rewriting its logical row/column.
    pub fn place(&mut self, pos: CellPos, mut tile: Tile) {
        tile.row = pos.row;
        tile.col = pos.col;
        self.cells[pos.index()] = Some(tile);
    }

    /// Remove and return the occupant of `pos`.
    pub fn take(&mut self, pos: CellPos) -> Option<Tile> {
        self.cells[pos.index()].take()
    }

    /// Exchange the occupants of two cells and update their logical addresses.
    pub fn swap(&mut self, a: CellPos, b: CellPos) {
        self.cells.swap(a.index(), b.index());
        for pos in [a, b] {
            let tile = self.tile_mut(pos);
            tile.row = pos.row;
            tile.col = pos.col;
        }
    }

    pub fn kinds(&self) -> KindGrid {
        let mut out = [[TileKind::Red; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in out.iter_mut().enumerate() {
            for (col, slot) in line.iter_mut().enumerate() {
                *slot = self.kind_at(CellPos::new(row, col));
            }
        }
        out
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Tiles in row-major order (vacant slots skipped)
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Verify every slot is occupied by a tile that knows its own address.
    #[track_caller]
    pub fn assert_consistent(&self) {
        for (i, cell) in self.cells.iter().enumerate() {
            let pos = CellPos::from_index(i);
            match cell {
                None => invariant_violation(&format!("no tile at {:?}", pos)),
                Some(tile) if tile.row != pos.row || tile.col != pos.col => {
                    invariant_violation(&format!(
                        "tile at {:?} believes it is at ({}, {})",
                        pos, tile.row, tile.col
                    ))
                }
                Some(_) => {}
            }
        }
    }

    /// Compact text dump, one line per row (e.g. `RGBYPORG`)
    pub fn to_letters(&self) -> Vec<String> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| match self.get(CellPos::new(row, col)) {
                        Some(tile) => tile.kind.letter(),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
