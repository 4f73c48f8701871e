//! Terminal input module (simulation-facing).
//!
//! Maps `crossterm` mouse and key events into [`crate::types::GestureEvent`]s
//! and funnels them from a capture thread to the thread that owns the board.

pub mod map;
pub mod queue;

pub use tui_match3_types as types;

pub use map::{map_key_event, map_mouse_event, screen_units, should_quit, translate};
pub use queue::{spawn_capture, GestureQueue, GestureSender, InputMessage};
