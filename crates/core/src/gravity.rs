//! Gravity compaction - remove marked tiles and refill from above
//!
//! Each column is compacted independently with a two-pointer pass from the
//! bottom row upward: surviving tiles slide down in their original order,
//! marked tiles are dropped, and the vacated top cells get fresh tiles that
//! start above the visible board so they fall into place.

use crate::gesture::BoardGeometry;
use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::rng::TileDealer;
use crate::tile::Tile;
use crate::types::{CellPos, BOARD_SIZE};

/// Compact every column of `grid` around `marked` and refill the gaps.
///
/// Refill kinds are unfiltered, so refills may form new runs. Returns the
/// number of tiles spawned (always `marked.len()`).
pub fn compact(
    grid: &mut Grid,
    marked: &MatchSet,
    geometry: &BoardGeometry,
    dealer: &mut TileDealer,
) -> usize {
    let mut spawned = 0;

    for col in 0..BOARD_SIZE {
        let mut write_row = BOARD_SIZE;

        for read_row in (0..BOARD_SIZE).rev() {
            let read = CellPos::new(read_row, col);
            if marked.contains(read) {
                grid.take(read);
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                if let Some(tile) = grid.take(read) {
                    grid.place(CellPos::new(write_row, col), tile);
                }
            }
        }

        // Rows 0..write_row are now vacant.
        let vacated = write_row;
        for row in 0..vacated {
            let pos = CellPos::new(row, col);
            let (x, target_y) = geometry.cell_center(pos);
            let start_y = target_y - vacated as f32 * geometry.cell_size;
            let tile = Tile::new(dealer.deal(), row, col, geometry.tile_size(), x, start_y);
            grid.place(pos, tile);
            spawned += 1;
        }
    }

    retarget(grid, geometry);
    for tile in grid.tiles_mut() {
        tile.matched = false;
    }
    grid.assert_consistent();
    spawned
}

/// Point every tile's target at the centre of the cell it occupies.
pub fn retarget(grid: &mut Grid, geometry: &BoardGeometry) {
    for tile in grid.tiles_mut() {
        let (x, y) = geometry.cell_center(CellPos::new(tile.row, tile.col));
        tile.set_target(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(0.0, 0.0, 10.0)
    }

    /// Column `c` holds kind index `(r + c) % 6`, resting on target
    fn grid() -> Grid {
        let g = geometry();
        let mut grid = Grid::empty();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let pos = CellPos::new(r, c);
                let (x, y) = g.cell_center(pos);
                let kind = TileKind::ALL[(r + c) % TileKind::COUNT];
                grid.place(pos, Tile::new(kind, r, c, g.tile_size(), x, y));
            }
        }
        grid
    }

    #[test]
    fn test_survivors_keep_order_and_slide_down() {
        let mut grid = grid();
        let before: Vec<TileKind> = (0..BOARD_SIZE)
            .map(|r| grid.kind_at(CellPos::new(r, 2)))
            .collect();

        let mut marked = MatchSet::new();
        marked.insert(CellPos::new(5, 2));
        marked.insert(CellPos::new(6, 2));
        let mut dealer = TileDealer::new(1);
        let spawned = compact(&mut grid, &marked, &geometry(), &mut dealer);
        assert_eq!(spawned, 2);

        // Rows 0..5 moved down by two, row 7 untouched.
        for r in 0..5 {
            assert_eq!(grid.kind_at(CellPos::new(r + 2, 2)), before[r]);
        }
        assert_eq!(grid.kind_at(CellPos::new(7, 2)), before[7]);
        grid.assert_consistent();
    }

    #[test]
    fn test_spawned_tiles_start_above_board() {
        let mut grid = grid();
        let mut marked = MatchSet::new();
        for r in 0..3 {
            marked.insert(CellPos::new(7 - r, 4));
        }
        let mut dealer = TileDealer::new(5);
        compact(&mut grid, &marked, &geometry(), &mut dealer);

        for r in 0..3 {
            let t = grid.tile(CellPos::new(r, 4));
            assert!(t.y < 0.0, "spawned tile at row {} starts at y={}", r, t.y);
            assert_eq!(t.target_y, r as f32 * 10.0 + 5.0);
        }
        // Moved survivors target their new cells but have not moved yet.
        let t = grid.tile(CellPos::new(3, 4));
        assert_eq!(t.target_y, 35.0);
        assert_eq!(t.y, 5.0);
    }

    #[test]
    fn test_untouched_columns_unchanged_and_flags_cleared() {
        let mut grid = grid();
        grid.tile_mut(CellPos::new(0, 0)).matched = true;
        let mut marked = MatchSet::new();
        marked.insert(CellPos::new(0, 0));
        let col7: Vec<Tile> = (0..BOARD_SIZE)
            .map(|r| grid.tile(CellPos::new(r, 7)).clone())
            .collect();
        let mut dealer = TileDealer::new(9);
        compact(&mut grid, &marked, &geometry(), &mut dealer);

        for r in 0..BOARD_SIZE {
            assert_eq!(grid.tile(CellPos::new(r, 7)), &col7[r]);
        }
        assert!(grid.tiles().all(|t| !t.matched));
    }
}
