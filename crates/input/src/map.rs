//! Mapping from terminal events to gesture events.
//!
//! Terminal cells are taller than they are wide, so pointer positions are
//! converted to screen units with a 1:2 aspect: one column is
//! [`UNITS_PER_COLUMN`] wide and one row is [`UNITS_PER_ROW`] tall. A pointer
//! event lands on the centre of the cell it was reported in.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::queue::InputMessage;
use crate::types::{GestureEvent, UNITS_PER_COLUMN, UNITS_PER_ROW};

/// Screen size in units for a terminal of `cols` x `rows` cells.
pub fn screen_units(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * UNITS_PER_COLUMN, rows as f32 * UNITS_PER_ROW)
}

/// Centre of terminal cell `(column, row)` in screen units.
pub fn cell_to_units(column: u16, row: u16) -> (f32, f32) {
    (
        column as f32 * UNITS_PER_COLUMN + UNITS_PER_COLUMN / 2.0,
        row as f32 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0,
    )
}

/// Map a left-button mouse event to a pointer gesture.
pub fn map_mouse_event(mouse: MouseEvent) -> Option<GestureEvent> {
    let (x, y) = cell_to_units(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GestureEvent::press(x, y)),
        MouseEventKind::Drag(MouseButton::Left) => Some(GestureEvent::move_to(x, y)),
        MouseEventKind::Up(MouseButton::Left) => Some(GestureEvent::release(x, y)),
        _ => None,
    }
}

/// Map a key press to a key gesture carrying the character typed.
pub fn map_key_event(key: KeyEvent) -> Option<GestureEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GestureEvent::key(c.to_string()))
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate any terminal event into a message for the owner thread.
pub fn translate(event: Event) -> Option<InputMessage> {
    match event {
        Event::Key(key) if should_quit(key) => Some(InputMessage::Quit),
        Event::Key(key) => map_key_event(key).map(InputMessage::Gesture),
        Event::Mouse(mouse) => map_mouse_event(mouse).map(InputMessage::Gesture),
        Event::Resize(cols, rows) => Some(InputMessage::Resize { cols, rows }),
        _ => None,
    }
}
