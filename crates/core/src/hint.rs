//! Hint scheduler - idle timer that surfaces one valid move
//!
//! The scheduler only keeps time; the owner decides what a hint is. It is armed
//! whenever control returns to the player, cancelled by any interaction or
//! state transition, and advanced by the same millisecond ticks as the game.

use crate::grid::Grid;
use crate::solver::find_valid_move;
use crate::types::{Pos, HINT_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintScheduler {
    delay_ms: u32,
    /// Remaining countdown; `None` when disarmed.
    remaining_ms: Option<u32>,
    active: Option<(Pos, Pos)>,
}

impl Default for HintScheduler {
    fn default() -> Self {
        Self::new(HINT_DELAY_MS)
    }
}

impl HintScheduler {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            remaining_ms: None,
            active: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// The pair currently pulsing, if any.
    pub fn active(&self) -> Option<(Pos, Pos)> {
        self.active
    }

    /// Restart the countdown and drop any visible hint.
    /// Returns true if a visible hint was cleared.
    pub fn arm(&mut self) -> bool {
        self.remaining_ms = Some(self.delay_ms);
        self.active.take().is_some()
    }

    /// Disarm and drop any visible hint.
    /// Returns true if a visible hint was cleared.
    pub fn cancel(&mut self) -> bool {
        self.remaining_ms = None;
        self.active.take().is_some()
    }

    /// Advance the countdown. On expiry, looks up a move on `grid`, stores it as
    /// the active hint and returns it. The timer disarms after firing, found or not.
    pub fn tick(&mut self, elapsed_ms: u32, grid: &Grid) -> Option<(Pos, Pos)> {
        let remaining = self.remaining_ms?;
        if elapsed_ms < remaining {
            self.remaining_ms = Some(remaining - elapsed_ms);
            return None;
        }
        self.remaining_ms = None;
        self.active = find_valid_move(grid);
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solvable() -> Grid {
        Grid::from_rows(&["AAB", "CDA", "DCD"]).unwrap()
    }

    #[test]
    fn test_disarmed_never_fires() {
        let mut hints = HintScheduler::new(100);
        assert_eq!(hints.tick(10_000, &solvable()), None);
    }

    #[test]
    fn test_fires_after_delay() {
        let grid = solvable();
        let mut hints = HintScheduler::new(100);
        hints.arm();
        assert_eq!(hints.tick(60, &grid), None);
        let hint = hints.tick(40, &grid);
        assert_eq!(hint, Some((Pos::new(0, 2), Pos::new(1, 2))));
        assert_eq!(hints.active(), hint);
        assert!(!hints.is_armed());
    }

    #[test]
    fn test_cancel_clears_visible_hint() {
        let grid = solvable();
        let mut hints = HintScheduler::new(16);
        hints.arm();
        hints.tick(16, &grid);
        assert!(hints.cancel());
        assert_eq!(hints.active(), None);
        assert!(!hints.cancel());
    }

    #[test]
    fn test_rearm_restarts_countdown() {
        let grid = solvable();
        let mut hints = HintScheduler::default();
        hints.arm();
        hints.tick(HINT_DELAY_MS - 1, &grid);
        hints.arm();
        assert_eq!(hints.tick(HINT_DELAY_MS - 1, &grid), None);
        assert!(hints.tick(1, &grid).is_some());
    }
}
