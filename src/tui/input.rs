//! Keyboard input mapping

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;

/// Dashboard actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    TogglePanel,
    ToggleAdvanced,
    Refresh,
    Share,
    ClearSession,
    Quit,
}

/// Map a key press to its action
pub(crate) fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        (_, m) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        (KeyCode::Char('t'), _) => Some(Action::TogglePanel),
        (KeyCode::Char('a'), _) => Some(Action::ToggleAdvanced),
        (KeyCode::Char('r'), _) => Some(Action::Refresh),
        (KeyCode::Char('s'), _) => Some(Action::Share),
        (KeyCode::Char('c'), _) => Some(Action::ClearSession),
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Action::Quit),
        _ => None,
    }
}

/// Handle one terminal event
pub(crate) fn handle_event(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) => {
            if let Some(action) = action_for_key(*key) {
                app.apply(action);
            }
        }
        // Ratatui re-lays out on the next draw
        Event::Resize(_, _) => app.dirty = true,
        _ => {}
    }
}

/// Feed a key event through the same path as the terminal does
#[cfg(test)]
pub(crate) fn simulate_key_event(app: &mut App, key: KeyEvent) {
    handle_event(app, &Event::Key(key));
}
