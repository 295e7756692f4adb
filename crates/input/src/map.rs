//! Key mapping from terminal events to session commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Latch a command for the falling piece
    Command(Command),
    /// Start a session, or dump the grid while one is running
    Fire,
}

/// Map keyboard input to a host action.
///
/// Release events are ignored so terminals that report them do not double-fire.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(KeyAction::Command(Command::MoveLeft))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(KeyAction::Command(Command::MoveRight))
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Some(KeyAction::Command(Command::Rotate))
        }
        KeyCode::Down | KeyCode::Char(' ' | 'j' | 'J' | 's' | 'S') => {
            Some(KeyAction::Command(Command::HardDrop))
        }

        KeyCode::Enter | KeyCode::Char('f' | 'F') => Some(KeyAction::Fire),

        _ => None,
    }
}

/// Check if key should quit the host.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
