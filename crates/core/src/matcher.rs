//! Match detection - pure scan for runs of three or more
//!
//! Rows are scanned left to right, then columns top to bottom. Every cell of a
//! maximal run of length >= [`MIN_RUN`] is marked. Marks are a set, so a cell
//! in both a horizontal and a vertical run is counted once.

use crate::grid::KindGrid;
use crate::types::{CellPos, BOARD_SIZE, MIN_RUN};

/// Set of marked cells, one bit per cell in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchSet {
    bits: u64,
}

const _: () = assert!(BOARD_SIZE * BOARD_SIZE <= 64);

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: CellPos) {
        self.bits |= 1u64 << pos.index();
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.in_bounds() && self.bits & (1u64 << pos.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of distinct marked cells
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Marked cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = CellPos> + '_ {
        let bits = self.bits;
        (0..BOARD_SIZE * BOARD_SIZE)
            .filter(move |i| bits & (1u64 << i) != 0)
            .map(CellPos::from_index)
    }
}

/// Mark every cell belonging to a run of [`MIN_RUN`] or more equal kinds.
pub fn find_matches(kinds: &KindGrid) -> MatchSet {
    let mut set = MatchSet::new();

    for row in 0..BOARD_SIZE {
        scan_line(&mut set, |i| kinds[row][i], |i| CellPos::new(row, i));
    }
    for col in 0..BOARD_SIZE {
        scan_line(&mut set, |i| kinds[i][col], |i| CellPos::new(i, col));
    }

    set
}

/// Two-pointer scan over one line of the board
fn scan_line<K: PartialEq>(
    set: &mut MatchSet,
    kind_at: impl Fn(usize) -> K,
    pos_at: impl Fn(usize) -> CellPos,
) {
    let mut start = 0;
    while start < BOARD_SIZE {
        let kind = kind_at(start);
        let mut end = start + 1;
        while end < BOARD_SIZE && kind_at(end) == kind {
            end += 1;
        }
        if end - start >= MIN_RUN {
            for i in start..end {
                set.insert(pos_at(i));
            }
        }
        start = end;
    }
}
