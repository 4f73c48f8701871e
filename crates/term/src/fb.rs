//! Framebuffer and color types for terminal rendering.

use crate::types::Rgba;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `src` over `self` using its alpha channel.
    pub fn blend(self, src: Rgba) -> Rgb {
        let a = src.a as u16;
        let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8;
        Rgb::new(mix(src.r, self.r), mix(src.g, self.g), mix(src.b, self.b))
    }
}

impl From<Rgba> for Rgb {
    fn from(c: Rgba) -> Self {
        Rgb::new(c.r, c.g, c.b)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        }
    }
}

/// 2D framebuffer of colored character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are reset.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Paint a cell's background and blank its glyph.
    pub fn paint(&mut self, x: u16, y: u16, color: Rgba) {
        if let Some(i) = self.idx(x, y) {
            let cell = &mut self.cells[i];
            cell.bg = cell.bg.blend(color);
            cell.ch = ' ';
        }
    }

    /// Draw a glyph over the existing background.
    pub fn glyph(&mut self, x: u16, y: u16, ch: char, fg: Rgba, bold: bool) {
        if let Some(i) = self.idx(x, y) {
            let cell = &mut self.cells[i];
            cell.fg = cell.bg.blend(fg);
            cell.ch = ch;
            cell.bold = bold;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Rgba, bold: bool) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.glyph(cx, y, ch, fg, bold);
            cx += 1;
        }
    }

    /// Characters of row `y`, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_opaque_and_transparent() {
        let bg = Rgb::new(10, 20, 30);
        assert_eq!(bg.blend(Rgba::rgb(200, 100, 0)), Rgb::new(200, 100, 0));
        assert_eq!(bg.blend(Rgba::new(200, 100, 0, 0)), bg);
    }

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", Rgba::rgb(255, 255, 255), false);
        assert_eq!(fb.row_text(0), "  ab");
    }

    #[test]
    fn test_paint_keeps_out_of_range_writes_harmless() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.paint(5, 5, Rgba::rgb(1, 2, 3));
        fb.paint(1, 1, Rgba::rgb(1, 2, 3));
        assert_eq!(fb.get(1, 1).map(|c| c.bg), Some(Rgb::new(1, 2, 3)));
        assert_eq!(fb.get(0, 0), Some(Cell::default()));
    }
}
