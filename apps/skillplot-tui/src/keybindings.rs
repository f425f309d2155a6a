//! Keybinding definitions

use crossterm::event::{KeyCode, KeyModifiers};

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Switch between scatter and density
    ToggleView,
    /// Move to the other density field
    CycleField,
    /// Toggle help
    ToggleHelp,
    /// Append a character to the focused field
    Insert(char),
    /// Delete the last character of the focused field
    Backspace,
    /// Clear the focused field
    Clear,
}

/// Get the action for a key press
pub fn action(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::Clear),
            _ => None,
        };
    }
    match code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleView),
        KeyCode::Up | KeyCode::Down => Some(Action::CycleField),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}
