//! Semantic input events so the event loop does not depend on raw key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Printable character for the focused text field.
    Char(char),
    Backspace,
    /// Enter: submit the form, or acknowledge whatever overlay is up.
    Submit,
    FocusNext,
    FocusPrev,
    CycleLeft,
    CycleRight,
    ClearForm,
    CycleTheme,
    HelpToggle,
    Dismiss,
    Exit,
    Resize { cols: u16, rows: u16 },
}

/// Translate a crossterm key event into a semantic event, if it maps to one.
pub(crate) fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(InputEvent::Exit),
            KeyCode::Char('l') => Some(InputEvent::ClearForm),
            KeyCode::Char('t') => Some(InputEvent::CycleTheme),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Tab | KeyCode::Down => Some(InputEvent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(InputEvent::FocusPrev),
        KeyCode::Left => Some(InputEvent::CycleLeft),
        KeyCode::Right => Some(InputEvent::CycleRight),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Esc => Some(InputEvent::Dismiss),
        KeyCode::F(1) => Some(InputEvent::HelpToggle),
        KeyCode::Char(c) => Some(InputEvent::Char(c)),
        _ => None,
    }
}
