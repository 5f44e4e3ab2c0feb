//! Key mapping from terminal events to cursor actions.

use crate::cursor::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the board cursor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    Move(Direction),
    /// Pick the cell under the cursor, or swap with the picked neighbour.
    Select,
    /// Drop the current selection.
    Cancel,
    Reset,
}

/// Map keyboard input to cursor actions.
pub fn handle_key_event(key: KeyEvent) -> Option<CursorAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(CursorAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(CursorAction::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(CursorAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(CursorAction::Move(Direction::Down))
        }

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(CursorAction::Select),
        KeyCode::Esc => Some(CursorAction::Cancel),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(CursorAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
