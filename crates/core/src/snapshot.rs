use crate::game_state::Phase;
use crate::scoring::{ObjectiveProgress, Stats};
use crate::types::{Cell, Pos};

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cells.
    pub cells: Vec<Cell>,
    /// Changes whenever the grid changes.
    pub board_id: u32,
    pub phase: Phase,
    pub stats: Stats,
    pub progress: ObjectiveProgress,
    pub hint: Option<(Pos, Pos)>,
    /// The last board generation ran out of attempts; no move may exist.
    pub stuck: bool,
    pub level_name: String,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.board_id = 0;
        self.phase = Phase::Idle;
        self.stats = Stats::default();
        self.progress = ObjectiveProgress::default();
        self.hint = None;
        self.stuck = false;
        self.level_name.clear();
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        if pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        self.cells[pos.row as usize * self.width as usize + pos.col as usize]
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_hinted(&self, pos: Pos) -> bool {
        matches!(self.hint, Some((a, b)) if a == pos || b == pos)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            board_id: 0,
            phase: Phase::Idle,
            stats: Stats::default(),
            progress: ObjectiveProgress::default(),
            hint: None,
            stuck: false,
            level_name: String::new(),
        }
    }
}
