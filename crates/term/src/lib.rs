//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: drawing primitives from the core
//! are rasterised into a framebuffer of character cells, which is then flushed
//! to the terminal as a diff against the previous frame.
//!
//! Goals:
//! - Keep `core` free of terminal concerns
//! - Map screen units onto non-square terminal cells (1 column = 10 units, 1 row = 20)
//! - Write only what changed each frame

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use canvas::FrameBufferCanvas;
pub use fb::{Cell, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
