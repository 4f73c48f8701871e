//! Rendering the whole application into a terminal framebuffer

use tui_match3::core::{AppContext, Application, MatchThreeState, ScreenSize, SimulationConfig};
use tui_match3::input::screen_units;
use tui_match3::term::{FrameBuffer, FrameBufferCanvas};
use tui_match3::types::GestureEvent;

fn running_app(cols: u16, rows: u16) -> Application {
    let (w, h) = screen_units(cols, rows);
    let ctx = AppContext::new(SimulationConfig::default(), ScreenSize::new(w, h), 42).unwrap();
    let mut app = Application::new(ctx);
    app.run(Box::new(MatchThreeState::new()));
    app
}

fn render(app: &Application, cols: u16, rows: u16) -> FrameBuffer {
    let mut fb = FrameBuffer::new(cols, rows);
    {
        let mut canvas = FrameBufferCanvas::new(&mut fb);
        app.draw(&mut canvas);
    }
    fb
}

#[test]
fn test_title_and_score_rows() {
    let app = running_app(80, 24);
    let fb = render(&app, 80, 24);

    assert!(fb.row_text(1).contains("Match Three"));
    assert!(fb.row_text(22).contains("Score: 0"));
}

#[test]
fn test_board_lines_drawn_inside_board() {
    let app = running_app(80, 24);
    let fb = render(&app, 80, 24);

    // Board spans rows 3..=20 for an 80x24 terminal.
    let board_rows: String = (3..=20).map(|y| fb.row_text(y)).collect();
    assert!(board_rows.contains('│'));
    assert!(board_rows.contains('─'));
    assert!(!fb.row_text(0).contains('│'));
}

#[test]
fn test_hint_toggle_changes_frame() {
    let mut app = running_app(80, 24);
    let plain = render(&app, 80, 24);

    app.dispatch_gesture(&GestureEvent::key("h"));
    let hinted = render(&app, 80, 24);

    if app
        .state()
        .and_then(|s| s.snapshot())
        .map(|snap| tui_match3::core::find_hint(&snap.board).is_some())
        .unwrap_or(false)
    {
        assert_ne!(plain, hinted);
        assert!((0..24).any(|y| hinted.row_text(y).contains('•')));
    }
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let app = running_app(4, 2);
    let fb = render(&app, 4, 2);
    assert_eq!(fb.width(), 4);
    assert_eq!(fb.height(), 2);
}
