//! Tile module - a typed unit occupying one grid cell
//!
//! A tile knows its logical cell and eases its drawn position toward the
//! centre of that cell a little on every fixed update.

use crate::canvas::{Canvas, Drawable};
use crate::types::{Rgba, TileKind, EASE_SPEED, SNAP_EPSILON};

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub matched: bool,
    pub size: f32,
}

impl Tile {
    /// Create a tile resting at `(x, y)`
    pub fn new(kind: TileKind, row: usize, col: usize, size: f32, x: f32, y: f32) -> Self {
        Self {
            kind,
            row,
            col,
            x,
            y,
            target_x: x,
            target_y: y,
            matched: false,
            size,
        }
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Ease toward the target by `min(1, EASE_SPEED * dt)` and snap when close.
    pub fn update_position(&mut self, dt: f32) {
        let t = (EASE_SPEED * dt).min(1.0);
        self.x += (self.target_x - self.x) * t;
        self.y += (self.target_y - self.y) * t;
        if (self.x - self.target_x).abs() < SNAP_EPSILON {
            self.x = self.target_x;
        }
        if (self.y - self.target_y).abs() < SNAP_EPSILON {
            self.y = self.target_y;
        }
    }

    /// Within epsilon of the target on both axes
    pub fn is_settled(&self) -> bool {
        (self.x - self.target_x).abs() < SNAP_EPSILON
            && (self.y - self.target_y).abs() < SNAP_EPSILON
    }

    /// Jump straight onto the target
    pub fn snap(&mut self) {
        self.x = self.target_x;
        self.y = self.target_y;
    }
}

/// Fill color for a tile kind
pub fn kind_color(kind: TileKind) -> Rgba {
    match kind {
        TileKind::Red => Rgba::rgb(255, 0, 0),
        TileKind::Blue => Rgba::rgb(0, 0, 255),
        TileKind::Green => Rgba::rgb(0, 255, 0),
        TileKind::Yellow => Rgba::rgb(255, 255, 0),
        TileKind::Purple => Rgba::rgb(128, 0, 128),
        TileKind::Orange => Rgba::rgb(255, 128, 0),
    }
}

impl Drawable for Tile {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let half = self.size / 2.0;
        canvas.set_fill_color(kind_color(self.kind));
        canvas.fill_rect(self.x - half, self.y - half, self.size, self.size);

        if self.matched {
            canvas.set_stroke_color(Rgba::rgb(255, 255, 255));
            canvas.set_stroke_width(3.0);
            canvas.stroke_rect(
                self.x - half - 2.0,
                self.y - half - 2.0,
                self.size + 4.0,
                self.size + 4.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn test_update_position_eases_toward_target() {
        let mut tile = Tile::new(TileKind::Red, 0, 0, 10.0, 0.0, 0.0);
        tile.set_target(100.0, 0.0);
        tile.update_position(1.0 / 30.0);
        // 5 * 1/30 = 1/6 of the gap
        assert!((tile.x - 100.0 / 6.0).abs() < 1e-3);
        assert!(!tile.is_settled());
    }

    #[test]
    fn test_update_position_snaps_within_epsilon() {
        let mut tile = Tile::new(TileKind::Blue, 0, 0, 10.0, 99.6, 50.0);
        tile.set_target(100.0, 50.0);
        tile.update_position(1.0 / 30.0);
        assert_eq!(tile.x, 100.0);
        assert!(tile.is_settled());
    }

    #[test]
    fn test_large_step_lands_exactly() {
        let mut tile = Tile::new(TileKind::Green, 0, 0, 10.0, -40.0, -40.0);
        tile.set_target(20.0, 20.0);
        tile.update_position(1.0);
        assert_eq!((tile.x, tile.y), (20.0, 20.0));
    }

    #[test]
    fn test_draw_outlines_matched_tile() {
        let mut tile = Tile::new(TileKind::Purple, 0, 0, 10.0, 5.0, 5.0);
        let mut canvas = RecordingCanvas::new();
        tile.draw(&mut canvas);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 0);

        tile.matched = true;
        let mut canvas = RecordingCanvas::new();
        tile.draw(&mut canvas);
        assert_eq!(canvas.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 1);
        assert_eq!(canvas.ops[0], DrawOp::FillColor(Rgba::rgb(128, 0, 128)));
    }
}
