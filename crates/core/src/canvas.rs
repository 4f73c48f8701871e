//! Drawing primitive contract consumed by the draw pass.
//!
//! The rendering backend implements [`Canvas`]; board pieces implement
//! [`Drawable`]. Coordinates are in the same screen units as the board geometry.

use crate::types::Rgba;

/// Immediate-mode drawing surface.
pub trait Canvas {
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn text(&mut self, text: &str, x: f32, y: f32);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_width(&mut self, width: f32);
    fn set_font(&mut self, name: &str, size: f32);
}

/// Something that renders itself onto a [`Canvas`] without mutating.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Canvas that records every call; used by tests to inspect draw output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

/// One recorded [`Canvas`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeRect { x: f32, y: f32, w: f32, h: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32 },
    StrokeCircle { cx: f32, cy: f32, r: f32 },
    FillCircle { cx: f32, cy: f32, r: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Text { text: String, x: f32, y: f32 },
    StrokeColor(Rgba),
    FillColor(Rgba),
    StrokeWidth(f32),
    Font { name: String, size: f32 },
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text strings drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(DrawOp::StrokeRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(DrawOp::FillRect { x, y, w, h });
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ops.push(DrawOp::StrokeCircle { cx, cy, r });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ops.push(DrawOp::FillCircle { cx, cy, r });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.ops.push(DrawOp::FillColor(color));
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.ops.push(DrawOp::StrokeWidth(width));
    }

    fn set_font(&mut self, name: &str, size: f32) {
        self.ops.push(DrawOp::Font {
            name: name.to_string(),
            size,
        });
    }
}
