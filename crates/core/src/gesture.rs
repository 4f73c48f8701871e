//! Gesture routing - pointer coordinates to board intents
//!
//! [`BoardGeometry`] is the stateless transform between screen units and
//! cells. [`GestureRouter`] adds swipe classification on top of it; the press
//! session itself lives in the board simulation.

use crate::config::ScreenSize;
use crate::types::{CellPos, Direction, BOARD_SIZE, SWIPE_THRESHOLD, TILE_SCALE};

/// Placement of the board on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
}

impl BoardGeometry {
    pub fn new(origin_x: f32, origin_y: f32, cell_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size,
        }
    }

    /// Geometry for a square board `width` units wide at `(x, y)`
    pub fn from_board(x: f32, y: f32, width: f32) -> Self {
        Self::new(x, y, width / BOARD_SIZE as f32)
    }

    /// Host layout: side = min(0.9 w, 0.7 h), centred horizontally, top at 0.15 h
    pub fn for_screen(screen: ScreenSize) -> Self {
        let w = screen.width;
        let h = screen.height;
        let side = (w * 0.9).min(h * 0.7);
        Self::from_board((w - side) / 2.0, h * 0.15, side)
    }

    /// Full board edge length
    pub fn board_size(&self) -> f32 {
        self.cell_size * BOARD_SIZE as f32
    }

    pub fn tile_size(&self) -> f32 {
        self.cell_size * TILE_SCALE
    }

    /// Cell under a screen point, if on the board
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellPos> {
        if !(self.cell_size > 0.0) {
            return None;
        }
        let row = ((y - self.origin_y) / self.cell_size).floor();
        let col = ((x - self.origin_x) / self.cell_size).floor();
        let n = BOARD_SIZE as f32;
        if row >= 0.0 && row < n && col >= 0.0 && col < n {
            Some(CellPos::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Centre of a cell in screen units
    pub fn cell_center(&self, pos: CellPos) -> (f32, f32) {
        (
            self.origin_x + pos.col as f32 * self.cell_size + self.cell_size / 2.0,
            self.origin_y + pos.row as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }
}

/// Stateless gesture classifier for one board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRouter {
    geometry: BoardGeometry,
    threshold: f32,
}

impl GestureRouter {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            threshold: SWIPE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Cell selected by a press at `(x, y)`
    pub fn select(&self, x: f32, y: f32) -> Option<CellPos> {
        self.geometry.cell_at(x, y)
    }

    /// Direction of a drag by `(dx, dy)`.
    ///
    /// The dominant axis wins (ties go vertical) and must travel strictly more
    /// than the threshold.
    pub fn swipe_direction(&self, dx: f32, dy: f32) -> Option<Direction> {
        if dx.abs() > dy.abs() && dx.abs() > self.threshold {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else if dy.abs() > self.threshold {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        } else {
            None
        }
    }

    /// Neighbour a swipe from `start` lands on, if both the swipe and the
    /// neighbour are valid
    pub fn swipe_target(&self, start: CellPos, dx: f32, dy: f32) -> Option<CellPos> {
        self.swipe_direction(dx, dy).and_then(|dir| start.step(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> GestureRouter {
        GestureRouter::new(BoardGeometry::new(10.0, 20.0, 50.0))
    }

    #[test]
    fn test_cell_at_maps_and_bounds() {
        let g = BoardGeometry::new(10.0, 20.0, 50.0);
        assert_eq!(g.cell_at(10.0, 20.0), Some(CellPos::new(0, 0)));
        assert_eq!(g.cell_at(59.9, 69.9), Some(CellPos::new(0, 0)));
        assert_eq!(g.cell_at(60.0, 70.0), Some(CellPos::new(1, 1)));
        assert_eq!(g.cell_at(9.9, 20.0), None);
        assert_eq!(g.cell_at(10.0 + 400.0, 20.0), None);
    }

    #[test]
    fn test_cell_center_inverts_cell_at() {
        let g = BoardGeometry::new(10.0, 20.0, 50.0);
        let pos = CellPos::new(3, 6);
        let (x, y) = g.cell_center(pos);
        assert_eq!(g.cell_at(x, y), Some(pos));
    }

    #[test]
    fn test_swipe_direction_dominant_axis() {
        let r = router();
        assert_eq!(r.swipe_direction(30.0, 5.0), Some(Direction::Right));
        assert_eq!(r.swipe_direction(-30.0, 29.0), Some(Direction::Left));
        assert_eq!(r.swipe_direction(3.0, -25.0), Some(Direction::Up));
        assert_eq!(r.swipe_direction(0.0, 21.0), Some(Direction::Down));
    }

    #[test]
    fn test_swipe_below_threshold_is_none() {
        let r = router();
        assert_eq!(r.swipe_direction(0.0, 0.0), None);
        assert_eq!(r.swipe_direction(20.0, 0.0), None);
        assert_eq!(r.swipe_direction(-19.0, 19.0), None);
    }

    #[test]
    fn test_swipe_target_off_board() {
        let r = router();
        assert_eq!(r.swipe_target(CellPos::new(0, 0), 0.0, -30.0), None);
        assert_eq!(
            r.swipe_target(CellPos::new(0, 0), 30.0, 0.0),
            Some(CellPos::new(0, 1))
        );
    }

    #[test]
    fn test_for_screen_layout() {
        let g = BoardGeometry::for_screen(ScreenSize::new(800.0, 480.0));
        // min(720, 336) = 336
        assert!((g.board_size() - 336.0).abs() < 1e-3);
        assert!((g.origin_x - 232.0).abs() < 1e-3);
        assert!((g.origin_y - 72.0).abs() < 1e-3);
    }
}
