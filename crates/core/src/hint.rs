//! Move finder - first adjacent swap that would produce a run

use crate::grid::KindGrid;
use crate::matcher::find_matches;
use crate::types::{CellPos, Direction, BOARD_SIZE};

/// First swap in row-major order (right before down) that creates a match.
pub fn find_hint(kinds: &KindGrid) -> Option<(CellPos, CellPos)> {
    let mut scratch = *kinds;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let a = CellPos::new(row, col);
            for dir in [Direction::Right, Direction::Down] {
                let Some(b) = a.step(dir) else {
                    continue;
                };
                if scratch[a.row][a.col] == scratch[b.row][b.col] {
                    continue;
                }
                swap_kinds(&mut scratch, a, b);
                let hit = !find_matches(&scratch).is_empty();
                swap_kinds(&mut scratch, a, b);
                if hit {
                    return Some((a, b));
                }
            }
        }
    }
    None
}

fn swap_kinds(kinds: &mut KindGrid, a: CellPos, b: CellPos) {
    let tmp = kinds[a.row][a.col];
    kinds[a.row][a.col] = kinds[b.row][b.col];
    kinds[b.row][b.col] = tmp;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn quiet() -> KindGrid {
        let mut g = [[TileKind::Red; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in g.iter_mut().enumerate() {
            for (c, k) in row.iter_mut().enumerate() {
                *k = TileKind::ALL[(r + 2 * c) % 4];
            }
        }
        g
    }

    #[test]
    fn test_hint_finds_setup() {
        let mut g = quiet();
        // Two oranges in row 5 plus a third diagonally below-left.
        g[5][1] = TileKind::Orange;
        g[5][2] = TileKind::Orange;
        g[6][0] = TileKind::Orange;
        let (a, b) = find_hint(&g).unwrap();
        let mut s = g;
        swap_kinds(&mut s, a, b);
        assert!(!find_matches(&s).is_empty());
        assert!(find_matches(&g).is_empty());
    }

    #[test]
    fn test_hint_is_adjacent() {
        let mut g = quiet();
        g[0][0] = TileKind::Orange;
        g[0][1] = TileKind::Orange;
        g[1][2] = TileKind::Orange;
        let (a, b) = find_hint(&g).unwrap();
        let d = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
        assert_eq!(d, 1);
    }

    #[test]
    fn test_hint_leaves_input_untouched() {
        let g = quiet();
        let copy = g;
        let _ = find_hint(&g);
        assert_eq!(g, copy);
    }
}
