//! Rasterise [`Canvas`] primitives onto a [`FrameBuffer`].
//!
//! Screen units map onto terminal cells through `UNITS_PER_COLUMN` and
//! `UNITS_PER_ROW`; a cell is covered by a shape when its centre is inside it.
//! Fills paint cell backgrounds. Strokes, lines, and text draw glyphs in
//! the foreground over whatever background is already there.

use crate::core::Canvas;
use crate::fb::FrameBuffer;
use crate::types::{Rgba, UNITS_PER_COLUMN, UNITS_PER_ROW};

/// Font size at or above which text is drawn bold
const BOLD_FONT_SIZE: f32 = 28.0;

/// Stroke width at or above which outlines are drawn bold
const BOLD_STROKE_WIDTH: f32 = 3.0;

pub struct FrameBufferCanvas<'a> {
    fb: &'a mut FrameBuffer,
    stroke: Rgba,
    fill: Rgba,
    stroke_width: f32,
    font_size: f32,
}

impl<'a> FrameBufferCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self {
            fb,
            stroke: Rgba::rgb(255, 255, 255),
            fill: Rgba::rgb(255, 255, 255),
            stroke_width: 1.0,
            font_size: 12.0,
        }
    }

    fn stroke_bold(&self) -> bool {
        self.stroke_width >= BOLD_STROKE_WIDTH
    }

    /// Inclusive cell span whose centres fall in `[start, start + len)`
    fn span(start: f32, len: f32, unit: f32, limit: u16) -> Option<(u16, u16)> {
        let first = (start / unit - 0.5).ceil().max(0.0);
        let last = ((start + len) / unit - 0.5).ceil() - 1.0;
        let last = last.min(limit as f32 - 1.0);
        if last < first || limit == 0 {
            return None;
        }
        Some((first as u16, last as u16))
    }

    fn cols(&self, x: f32, w: f32) -> Option<(u16, u16)> {
        Self::span(x, w, UNITS_PER_COLUMN, self.fb.width())
    }

    fn rows(&self, y: f32, h: f32) -> Option<(u16, u16)> {
        Self::span(y, h, UNITS_PER_ROW, self.fb.height())
    }

    /// Cell containing a point, if on screen
    fn cell_of(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / UNITS_PER_COLUMN).floor();
        let row = (y / UNITS_PER_ROW).floor();
        if col < 0.0 || row < 0.0 || col >= self.fb.width() as f32 || row >= self.fb.height() as f32
        {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn center(col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * UNITS_PER_COLUMN,
            (row as f32 + 0.5) * UNITS_PER_ROW,
        )
    }

    /// Every on-screen cell whose centre is within `r` of `(cx, cy)`
    fn disc_cells(&self, cx: f32, cy: f32, r: f32, mut f: impl FnMut(u16, u16, f32)) {
        let (Some((c0, c1)), Some((r0, r1))) = (self.cols(cx - r, 2.0 * r), self.rows(cy - r, 2.0 * r))
        else {
            return;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let (x, y) = Self::center(col, row);
                let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                if d <= r {
                    f(col, row, d);
                }
            }
        }
    }
}

impl Canvas for FrameBufferCanvas<'_> {
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (Some((c0, c1)), Some((r0, r1))) = (self.cols(x, width), self.rows(y, height)) else {
            return;
        };
        let (color, bold) = (self.stroke, self.stroke_bold());
        for col in c0..=c1 {
            self.fb.glyph(col, r0, '─', color, bold);
            self.fb.glyph(col, r1, '─', color, bold);
        }
        for row in r0..=r1 {
            self.fb.glyph(c0, row, '│', color, bold);
            self.fb.glyph(c1, row, '│', color, bold);
        }
        if r0 != r1 && c0 != c1 {
            self.fb.glyph(c0, r0, '┌', color, bold);
            self.fb.glyph(c1, r0, '┐', color, bold);
            self.fb.glyph(c0, r1, '└', color, bold);
            self.fb.glyph(c1, r1, '┘', color, bold);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (Some((c0, c1)), Some((r0, r1))) = (self.cols(x, width), self.rows(y, height)) else {
            return;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.fb.paint(col, row, self.fill);
            }
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        // Ring about one column thick.
        let band = UNITS_PER_COLUMN;
        let (color, bold) = (self.stroke, self.stroke_bold());
        let mut ring = Vec::new();
        self.disc_cells(cx, cy, radius + band / 2.0, |col, row, d| {
            if d >= radius - band / 2.0 {
                ring.push((col, row));
            }
        });
        for (col, row) in ring {
            self.fb.glyph(col, row, '•', color, bold);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let mut disc = Vec::new();
        self.disc_cells(cx, cy, radius, |col, row, _| disc.push((col, row)));
        for (col, row) in disc {
            self.fb.paint(col, row, self.fill);
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (Some((ca, ra)), Some((cb, rb))) = (self.cell_of(x1, y1), self.cell_of(x2, y2)) else {
            // Clip by walking in unit space; endpoints off screen are common
            // for lines on the far board edge.
            self.line_clipped(x1, y1, x2, y2);
            return;
        };
        self.line_cells(ca as i32, ra as i32, cb as i32, rb as i32);
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        if let Some((col, row)) = self.cell_of(x.max(0.0), y.max(0.0)) {
            let bold = self.font_size >= BOLD_FONT_SIZE;
            self.fb.put_str(col, row, text, self.fill, bold);
        }
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    fn set_font(&mut self, _name: &str, size: f32) {
        self.font_size = size;
    }
}

impl FrameBufferCanvas<'_> {
    /// Bresenham over cells, choosing a glyph by the line's slope
    fn line_cells(&mut self, c0: i32, r0: i32, c1: i32, r1: i32) {
        let ch = if r0 == r1 {
            '─'
        } else if c0 == c1 {
            '│'
        } else {
            '·'
        };
        let (color, bold) = (self.stroke, self.stroke_bold());
        let dx = (c1 - c0).abs();
        let dy = -(r1 - r0).abs();
        let sx = if c0 < c1 { 1 } else { -1 };
        let sy = if r0 < r1 { 1 } else { -1 };
        let (mut c, mut r, mut err) = (c0, r0, dx + dy);
        loop {
            if c >= 0 && r >= 0 {
                self.fb.glyph(c as u16, r as u16, ch, color, bold);
            }
            if c == c1 && r == r1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                c += sx;
            }
            if e2 <= dx {
                err += dx;
                r += sy;
            }
        }
    }

    /// Clamp both endpoints onto the screen, then draw
    fn line_clipped(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let w = self.fb.width() as f32 * UNITS_PER_COLUMN;
        let h = self.fb.height() as f32 * UNITS_PER_ROW;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        // Entirely off one side.
        if (x1 < 0.0 && x2 < 0.0) || (y1 < 0.0 && y2 < 0.0) || (x1 >= w && x2 >= w) || (y1 >= h && y2 >= h)
        {
            return;
        }
        let clamp = |v: f32, max: f32| v.clamp(0.0, max - 0.001);
        let a = self.cell_of(clamp(x1, w), clamp(y1, h));
        let b = self.cell_of(clamp(x2, w), clamp(y2, h));
        if let (Some((ca, ra)), Some((cb, rb))) = (a, b) {
            self.line_cells(ca as i32, ra as i32, cb as i32, rb as i32);
        }
    }
}
