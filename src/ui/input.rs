//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or pause the countdown
    Toggle,
    /// Back to a fresh work phase without touching the music
    Reset,
    Quit,
}

/// Map a key press to a command
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Toggle),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
