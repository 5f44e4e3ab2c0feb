//! Board cursor and two-step selection.
//!
//! The first select marks a cell. Selecting an orthogonal neighbour of the
//! marked cell produces a swap intent; selecting the marked cell again clears
//! the mark; selecting any other cell moves the mark there.

use crate::map::CursorAction;
use crate::types::{PlayerIntent, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    width: u8,
    height: u8,
    pos: Pos,
    selected: Option<Pos>,
}

impl Cursor {
    /// Cursor centred on a `width x height` board.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            pos: Pos::new(height / 2, width / 2),
            selected: None,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Move one cell, clamped to the board. Returns false at an edge.
    pub fn move_by(&mut self, direction: Direction) -> bool {
        let Pos { row, col } = self.pos;
        let next = match direction {
            Direction::Up => row.checked_sub(1).map(|r| Pos::new(r, col)),
            Direction::Down => (row + 1 < self.height).then(|| Pos::new(row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| Pos::new(row, c)),
            Direction::Right => (col + 1 < self.width).then(|| Pos::new(row, col + 1)),
        };
        match next {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Select the cell under the cursor; yields a swap when it completes a pair.
    pub fn select(&mut self) -> Option<PlayerIntent> {
        match self.selected {
            None => {
                self.selected = Some(self.pos);
                None
            }
            Some(marked) if marked == self.pos => {
                self.selected = None;
                None
            }
            Some(marked) if marked.is_adjacent(self.pos) => {
                self.selected = None;
                Some(PlayerIntent::Swap(marked, self.pos))
            }
            Some(_) => {
                self.selected = Some(self.pos);
                None
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply a mapped key action. Returns the intent for the engine, if any.
    pub fn apply(&mut self, action: CursorAction) -> Option<PlayerIntent> {
        match action {
            CursorAction::Move(direction) => {
                self.move_by(direction);
                None
            }
            CursorAction::Select => self.select(),
            CursorAction::Cancel => {
                self.clear_selection();
                None
            }
            CursorAction::Reset => {
                self.clear_selection();
                Some(PlayerIntent::Reset)
            }
        }
    }
}
