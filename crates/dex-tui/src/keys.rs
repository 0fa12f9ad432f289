//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Help line for the fetch binding.
pub const FETCH_HELP: &str = "press 'f' or 'p' to fetch a pokemon";

/// Help line for the quit binding.
pub const QUIT_HELP: &str = "press q to quit";

/// Help line shown while typing a filter.
pub const FILTER_HELP: &str = "Enter:apply  Esc:clear  Ctrl+C:quit";

/// Whether keys are commands or filter text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    #[default]
    Normal,
    /// Keys are typed into the list filter.
    Filter,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the app.
    Quit,
    /// Catch a new pokemon.
    Catch,
    /// Move the list cursor up.
    Up,
    /// Move the list cursor down.
    Down,
    /// Jump to the newest catch.
    Top,
    /// Jump to the oldest catch.
    Bottom,
    /// Start typing a filter.
    StartFilter,
    /// Append a character to the filter.
    FilterInput(char),
    /// Delete the last filter character.
    FilterBackspace,
    /// Keep the filter and go back to commands.
    FilterApply,
    /// Drop the filter and go back to commands.
    FilterClear,
}

/// Map a key press to an action for the given mode.
pub fn action(key: KeyEvent, mode: InputMode) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('f') | KeyCode::Char('p') => Some(Action::Catch),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
            KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
            KeyCode::Char('/') => Some(Action::StartFilter),
            _ => None,
        },
        InputMode::Filter => match key.code {
            KeyCode::Esc => Some(Action::FilterClear),
            KeyCode::Enter => Some(Action::FilterApply),
            KeyCode::Backspace => Some(Action::FilterBackspace),
            KeyCode::Char(c) => Some(Action::FilterInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(action(key(code), InputMode::Normal), Some(Action::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action(ctrl_c, InputMode::Normal), Some(Action::Quit));
        assert_eq!(action(ctrl_c, InputMode::Filter), Some(Action::Quit));
    }

    #[test]
    fn fetch_keys() {
        assert_eq!(action(key(KeyCode::Char('f')), InputMode::Normal), Some(Action::Catch));
        assert_eq!(action(key(KeyCode::Char('p')), InputMode::Normal), Some(Action::Catch));
    }

    #[test]
    fn filter_mode_types_command_letters() {
        assert_eq!(
            action(key(KeyCode::Char('q')), InputMode::Filter),
            Some(Action::FilterInput('q'))
        );
        assert_eq!(
            action(key(KeyCode::Char('f')), InputMode::Filter),
            Some(Action::FilterInput('f'))
        );
        assert_eq!(action(key(KeyCode::Esc), InputMode::Filter), Some(Action::FilterClear));
        assert_eq!(action(key(KeyCode::Enter), InputMode::Filter), Some(Action::FilterApply));
    }

    #[test]
    fn unbound_keys_ignored() {
        assert_eq!(action(key(KeyCode::Char('x')), InputMode::Normal), None);
        assert_eq!(action(key(KeyCode::Tab), InputMode::Filter), None);
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(action(ctrl_f, InputMode::Normal), None);
    }
}
