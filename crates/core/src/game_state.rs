//! Game state module - session state machine
//!
//! Ties together the grid, the cascade resolver, the solvability guarantor,
//! scoring, objectives and the hint timer. A turn is computed synchronously:
//! [`GameState::attempt_swap`] returns with the board already settled and a
//! [`TurnReport`] listing every step for replay.
//!
//! ```text
//! Idle --swap--> Resolving --(remove, gravity, pull, refill, detect)*--> check
//!   check: moves left == 0  -> GameOver
//!          no valid move    -> Cleanup (one reshuffle) -> Idle
//!          otherwise        -> Idle
//! ```

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::cascade::{settle, CascadeStep};
use crate::effects::resolve;
use crate::events::{GameEvent, GameObserver};
use crate::fill::{fill_board, FillOutcome};
use crate::grid::Grid;
use crate::hint::HintScheduler;
use crate::level::LevelConfig;
use crate::matcher::find_matches;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{pass_points, GameOverReport, ObjectiveProgress, Objectives, Stats};
use crate::snapshot::GameSnapshot;
use crate::solver::{has_valid_move, swap_creates_match};
use crate::types::{FigurineKind, PlayerIntent, Pos, Tile};

/// Upper bound on detection passes in one turn. Only a degenerate random source
/// can get near it.
const MAX_CASCADE_PASSES: u32 = 256;

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the player.
    Idle,
    /// A swap is being resolved.
    Resolving,
    /// The board is being regenerated because no move was left.
    Cleanup,
    /// The move budget is spent.
    GameOver,
}

/// Why a swap was refused without consuming a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Busy,
    GameOver,
    OutOfBounds,
    NotAdjacent,
    Obstacle,
    EmptyCell,
}

/// Everything one resolved swap did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub steps: Vec<CascadeStep>,
    /// Points scored during this turn.
    pub points: u32,
    /// Number of detection passes that removed cells.
    pub passes: u32,
    pub reshuffled: bool,
}

/// Result of [`GameState::attempt_swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Refused outright; nothing changed.
    Rejected(RejectReason),
    /// Legal but matchless; the swap was undone and no move consumed.
    Reverted,
    /// The swap matched and the board has settled.
    Resolved(TurnReport),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    level: LevelConfig,
    grid: Grid,
    rng: R,
    stats: Stats,
    objectives: Objectives,
    phase: Phase,
    hints: HintScheduler,
    events: Vec<GameEvent>,
    /// Monotonic session id (increments on reset).
    session_id: u32,
    /// Increments whenever the grid changes.
    board_id: u32,
    /// Figurine kinds already announced this session.
    figurines_seen: BTreeSet<FigurineKind>,
    stuck: bool,
}

impl GameState<SimpleRng> {
    /// Start a session on `level` with a seeded [`SimpleRng`].
    pub fn new(level: LevelConfig, seed: u32) -> Self {
        Self::with_rng(level, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Start a session with a caller-supplied random source.
    pub fn with_rng(level: LevelConfig, rng: R) -> Self {
        let grid = Grid::with_obstacles(level.width, level.height, &level.obstacles);
        let mut state = Self::from_parts(level, grid, rng);
        state.regenerate();
        state.events.push(GameEvent::StatsUpdated(state.stats.clone()));
        state.hints.arm();
        info!(
            "level {:?} started: {}x{}, {} moves",
            state.level.name, state.level.width, state.level.height, state.level.max_moves
        );
        state
    }

    /// Start a session on a prepared grid, used as-is.
    ///
    /// The grid is not validated against the level; this is meant for tests and
    /// tooling that need an exact starting position.
    pub fn with_grid(level: LevelConfig, grid: Grid, rng: R) -> Self {
        let mut state = Self::from_parts(level, grid, rng);
        state.note_figurines();
        state.hints.arm();
        state
    }

    fn from_parts(level: LevelConfig, grid: Grid, rng: R) -> Self {
        let objectives = Objectives::new(level.targets.clone());
        Self {
            stats: Stats::new(level.max_moves),
            objectives,
            level,
            grid,
            rng,
            phase: Phase::Idle,
            hints: HintScheduler::default(),
            events: Vec::new(),
            session_id: 0,
            board_id: 0,
            figurines_seen: BTreeSet::new(),
            stuck: false,
        }
    }

    /// Replace the hint delay (milliseconds). Rearms the timer when idle.
    pub fn set_hint_delay(&mut self, delay_ms: u32) {
        self.hints = HintScheduler::new(delay_ms);
        if self.phase == Phase::Idle {
            self.hints.arm();
        }
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.stats.moves_remaining
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn hint(&self) -> Option<(Pos, Pos)> {
        self.hints.active()
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    pub fn progress(&self) -> ObjectiveProgress {
        self.objectives.evaluate(&self.stats)
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.board_id = self.board_id;
        out.phase = self.phase;
        out.stats.clone_from(&self.stats);
        out.progress = self.progress();
        out.hint = self.hints.active();
        out.stuck = self.stuck;
        out.level_name.clone_from(&self.level.name);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain queued events into an observer.
    pub fn dispatch(&mut self, observer: &mut dyn GameObserver) {
        for event in self.drain_events() {
            event.dispatch_to(observer);
        }
    }

    /// Apply a player intent. `Reset` yields `None`.
    pub fn apply_intent(&mut self, intent: PlayerIntent) -> Option<SwapOutcome> {
        match intent {
            PlayerIntent::Swap(a, b) => Some(self.attempt_swap(a, b)),
            PlayerIntent::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Restart the session: fresh board, full move budget, cleared counters.
    pub fn reset(&mut self) {
        self.cancel_hint();
        self.session_id = self.session_id.wrapping_add(1);
        self.stats = Stats::new(self.level.max_moves);
        self.figurines_seen.clear();
        self.phase = Phase::Idle;
        self.regenerate();
        self.events.push(GameEvent::StatsUpdated(self.stats.clone()));
        self.hints.arm();
        info!("session {} reset", self.session_id);
    }

    /// Player activity that is not a swap (cursor movement, selection).
    /// Restarts the idle timer and clears a visible hint.
    pub fn interact(&mut self) {
        let cleared = if self.phase == Phase::Idle {
            self.hints.arm()
        } else {
            self.hints.cancel()
        };
        if cleared {
            self.events.push(GameEvent::HintCleared);
        }
    }

    /// Advance timers by `elapsed_ms`. Only the hint timer runs, and only while idle.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase != Phase::Idle {
            return;
        }
        if let Some((a, b)) = self.hints.tick(elapsed_ms, &self.grid) {
            self.events.push(GameEvent::HintShown(a, b));
        }
    }

    /// Reshuffle once if the board has no valid move. Returns whether a move exists afterwards.
    pub fn ensure_solvable(&mut self) -> bool {
        if has_valid_move(&self.grid) {
            self.stuck = false;
            return true;
        }
        if self.phase != Phase::Idle {
            return false;
        }
        let mut steps = Vec::new();
        self.cleanup(&mut steps);
        self.phase = Phase::Idle;
        self.hints.arm();
        !self.stuck
    }

    /// Try to swap two cells.
    pub fn attempt_swap(&mut self, a: Pos, b: Pos) -> SwapOutcome {
        match self.phase {
            Phase::Idle => {}
            Phase::GameOver => return SwapOutcome::Rejected(RejectReason::GameOver),
            Phase::Resolving | Phase::Cleanup => return SwapOutcome::Rejected(RejectReason::Busy),
        }
        if let Err(reason) = self.check_swap(a, b) {
            return SwapOutcome::Rejected(reason);
        }

        self.cancel_hint();
        if !swap_creates_match(&self.grid, a, b) {
            self.hints.arm();
            return SwapOutcome::Reverted;
        }

        self.phase = Phase::Resolving;
        self.grid.swap(a, b);
        self.board_id = self.board_id.wrapping_add(1);
        self.stats.moves_remaining = self.stats.moves_remaining.saturating_sub(1);

        let mut report = TurnReport {
            steps: vec![CascadeStep::Swapped { a, b }],
            ..TurnReport::default()
        };
        self.resolve_cascade(&mut report);
        self.finish_turn(&mut report);
        SwapOutcome::Resolved(report)
    }

    fn check_swap(&self, a: Pos, b: Pos) -> Result<(), RejectReason> {
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return Err(RejectReason::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(RejectReason::NotAdjacent);
        }
        if self.grid.is_obstacle(a) || self.grid.is_obstacle(b) {
            return Err(RejectReason::Obstacle);
        }
        if self.grid.is_empty(a) || self.grid.is_empty(b) {
            return Err(RejectReason::EmptyCell);
        }
        Ok(())
    }

    /// Remove, settle and re-detect until no match is left.
    fn resolve_cascade(&mut self, report: &mut TurnReport) {
        let mut combo = 1;
        loop {
            let groups = find_matches(&self.grid);
            if groups.is_empty() {
                break;
            }
            if combo > MAX_CASCADE_PASSES {
                warn!("cascade stopped after {MAX_CASCADE_PASSES} passes");
                break;
            }
            if combo >= 2 {
                self.events.push(GameEvent::Combo(combo));
            }

            let resolution = resolve(&self.grid, groups);
            let points = pass_points(&resolution.groups, resolution.figurines.len(), combo);
            self.stats.score += points;
            self.stats.combos.record(&resolution);
            report.points += points;

            for pos in resolution.removed() {
                if let Some(tile) = self.grid.tile(pos) {
                    self.stats.collect(tile);
                    self.events.push(GameEvent::TileCollected(tile));
                }
                self.grid.set(pos, None);
            }
            for cue in &resolution.cues {
                self.events.push(GameEvent::Effect(*cue));
            }
            self.events.push(GameEvent::StatsUpdated(self.stats.clone()));
            debug!(
                "pass {combo}: {} group(s), {} cell(s), {points} points",
                resolution.groups.len(),
                resolution.cells.len() + resolution.figurines.len()
            );

            report.steps.push(CascadeStep::Removed {
                combo,
                points,
                cells: resolution.cells,
                figurines: resolution.figurines,
            });
            settle(&mut self.grid, &self.level.kinds, &mut self.rng, &mut report.steps);
            self.note_figurines();
            report.passes = combo;
            combo += 1;
        }
    }

    /// Game-over or solvability check once the board is quiet.
    fn finish_turn(&mut self, report: &mut TurnReport) {
        if self.stats.moves_remaining == 0 {
            self.phase = Phase::GameOver;
            let progress = self.objectives.evaluate(&self.stats);
            let stars = self.objectives.stars(self.stats.score, progress.met);
            info!(
                "game over: score {}, won {}, {} star(s)",
                self.stats.score, progress.met, stars
            );
            self.events.push(GameEvent::StatsUpdated(self.stats.clone()));
            self.events.push(GameEvent::GameOver(GameOverReport {
                stats: self.stats.clone(),
                won: progress.met,
                stars,
            }));
            return;
        }

        if has_valid_move(&self.grid) {
            self.stuck = false;
        } else {
            self.cleanup(&mut report.steps);
            report.reshuffled = true;
        }
        self.phase = Phase::Idle;
        self.events.push(GameEvent::StatsUpdated(self.stats.clone()));
        self.hints.arm();
    }

    /// One full-board reshuffle.
    fn cleanup(&mut self, steps: &mut Vec<CascadeStep>) {
        self.phase = Phase::Cleanup;
        self.cancel_hint();
        self.events.push(GameEvent::CleanupStarted);
        debug!("no valid move left, reshuffling");
        let outcome = self.regenerate();
        steps.push(CascadeStep::Reshuffled {
            attempts: outcome.attempts,
            solvable: outcome.solvable,
        });
        self.events.push(GameEvent::CleanupFinished);
    }

    /// Clear and refill every non-obstacle cell.
    fn regenerate(&mut self) -> FillOutcome {
        let outcome = fill_board(&mut self.grid, &self.level.kinds, &mut self.rng);
        self.stuck = !outcome.solvable;
        self.board_id = self.board_id.wrapping_add(1);
        self.note_figurines();
        outcome
    }

    /// Announce each figurine kind the first time it is on the board.
    fn note_figurines(&mut self) {
        let on_board = self.grid.cells().iter().filter_map(|cell| match cell {
            Some(Tile::Figurine(kind)) => Some(*kind),
            _ => None,
        });
        for kind in on_board {
            if self.figurines_seen.insert(kind) {
                self.events.push(GameEvent::FigurineAppeared(kind));
            }
        }
    }

    fn cancel_hint(&mut self) {
        if self.hints.cancel() {
            self.events.push(GameEvent::HintCleared);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::is_quiescent;
    use crate::rng::ScriptedRng;
    use crate::scoring::Targets;
    use crate::types::{ItemKind, Tile, HINT_DELAY_MS};

    fn level(moves: u32) -> LevelConfig {
        LevelConfig::new(5, 5, moves, &ItemKind::CLASSIC).unwrap()
    }

    fn state(rows: &[&str], moves: u32) -> GameState<SimpleRng> {
        let grid = Grid::from_rows(rows).unwrap();
        let level = LevelConfig::new(grid.width(), grid.height(), moves, &ItemKind::CLASSIC).unwrap();
        GameState::with_grid(level, grid, SimpleRng::new(11))
    }

    #[test]
    fn test_new_session_is_idle_and_solvable() {
        let game = GameState::new(level(10), 12345);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.moves_remaining(), 10);
        assert_eq!(game.score(), 0);
        assert!(is_quiescent(game.grid()));
        assert!(has_valid_move(game.grid()));
        assert!(!game.is_stuck());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameState::new(level(10), 7);
        let b = GameState::new(level(10), 7);
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_rejections_consume_nothing() {
        let mut game = state(&["AB#C", "CAAB", "BCDA"], 5);
        let before = game.grid().clone();

        assert_eq!(
            game.attempt_swap(Pos::new(0, 0), Pos::new(0, 9)),
            SwapOutcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            game.attempt_swap(Pos::new(0, 0), Pos::new(1, 1)),
            SwapOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(
            game.attempt_swap(Pos::new(0, 1), Pos::new(0, 2)),
            SwapOutcome::Rejected(RejectReason::Obstacle)
        );
        assert_eq!(game.moves_remaining(), 5);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_matchless_swap_reverts() {
        let mut game = state(&["ABC", "CAB", "BCA"], 5);
        let before = game.grid().clone();
        assert_eq!(game.attempt_swap(Pos::new(0, 0), Pos::new(0, 1)), SwapOutcome::Reverted);
        assert_eq!(game.grid(), &before);
        assert_eq!(game.moves_remaining(), 5);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_resolved_swap_scores_and_settles() {
        // Moving the A at (0,0) down completes A A A on row 1.
        let mut game = state(&["ADEC", "BAAD", "CEDB", "DCBE"], 5);
        let report = match game.attempt_swap(Pos::new(0, 0), Pos::new(1, 0)) {
            SwapOutcome::Resolved(report) => report,
            other => panic!("expected a resolved turn, got {other:?}"),
        };
        assert!(report.points >= 30);
        assert_eq!(game.moves_remaining(), 4);
        assert!(game.stats().collected_of(Tile::Item(ItemKind::Chicken)) >= 3);
        assert!(is_quiescent(game.grid()));
        assert!(matches!(report.steps[0], CascadeStep::Swapped { .. }));
        assert!(matches!(
            report.steps[1],
            CascadeStep::Removed { combo: 1, points: 30, .. }
        ));
        assert!(matches!(game.phase(), Phase::Idle | Phase::GameOver));
    }

    #[test]
    fn test_last_move_ends_game() {
        let mut game = state(&["ADEC", "BAAD", "CEDB", "DCBE"], 1);
        game.drain_events();
        let outcome = game.attempt_swap(Pos::new(0, 0), Pos::new(1, 0));
        assert!(matches!(outcome, SwapOutcome::Resolved(_)));
        assert_eq!(game.phase(), Phase::GameOver);

        let events = game.drain_events();
        let report = events.iter().find_map(|e| match e {
            GameEvent::GameOver(r) => Some(r.clone()),
            _ => None,
        });
        let report = report.unwrap();
        assert!(report.won);
        assert_eq!(report.stars, 3);
        assert_eq!(
            game.attempt_swap(Pos::new(0, 0), Pos::new(1, 0)),
            SwapOutcome::Rejected(RejectReason::GameOver)
        );
    }

    #[test]
    fn test_unmet_targets_lose() {
        let grid = Grid::from_rows(&["ADEC", "BAAD", "CEDB", "DCBE"]).unwrap();
        let level = LevelConfig::new(4, 4, 1, &ItemKind::CLASSIC)
            .unwrap()
            .with_targets(Targets {
                min_score: Some(10_000),
                ..Targets::default()
            });
        let mut game = GameState::with_grid(level, grid, SimpleRng::new(3));
        game.attempt_swap(Pos::new(0, 0), Pos::new(1, 0));
        let report = game
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                GameEvent::GameOver(r) => Some(r),
                _ => None,
            })
            .unwrap();
        assert!(!report.won);
        assert_eq!(report.stars, 0);
    }

    #[test]
    fn test_hint_appears_after_idle_delay_and_clears_on_interaction() {
        let mut game = state(&["AAB", "CDA", "DCD"], 5);
        game.tick(HINT_DELAY_MS - 16);
        assert_eq!(game.hint(), None);
        game.tick(16);
        assert_eq!(game.hint(), Some((Pos::new(0, 2), Pos::new(1, 2))));
        assert!(game
            .drain_events()
            .contains(&GameEvent::HintShown(Pos::new(0, 2), Pos::new(1, 2))));

        game.interact();
        assert_eq!(game.hint(), None);
        assert_eq!(game.drain_events(), vec![GameEvent::HintCleared]);
    }

    #[test]
    fn test_ensure_solvable_reshuffles_dead_board() {
        let mut game = state(&["ABCDE", "CDEAB", "EABCD", "BCDEA", "DEABC"], 5);
        assert!(!has_valid_move(game.grid()));
        assert!(game.ensure_solvable());
        assert!(has_valid_move(game.grid()));
        let events = game.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CleanupStarted))
                .count(),
            1
        );
        assert!(events.contains(&GameEvent::CleanupFinished));
    }

    #[test]
    fn test_reset_restores_budget_and_bumps_session() {
        let mut game = GameState::new(level(3), 99);
        let moves = game.moves_remaining();
        game.reset();
        assert_eq!(game.session_id(), 1);
        assert_eq!(game.moves_remaining(), moves);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.apply_intent(PlayerIntent::Reset).is_none());
        assert_eq!(game.session_id(), 2);
    }

    fn figurine_notices(events: &[GameEvent]) -> Vec<FigurineKind> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::FigurineAppeared(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_figurine_notice_fires_once_per_kind() {
        let grid = Grid::from_rows(&["*AB", "BCA", "CAB"]).unwrap();
        let level = LevelConfig::new(3, 3, 5, &ItemKind::CLASSIC).unwrap();
        let mut game = GameState::with_grid(level, grid, ScriptedRng::new(vec![0]));
        assert_eq!(figurine_notices(&game.drain_events()), vec![FigurineKind::Belka]);

        // Same kind again: no new notice.
        game.note_figurines();
        assert!(figurine_notices(&game.drain_events()).is_empty());

        // A different kind is announced on its first appearance.
        game.grid.set(Pos::new(0, 0), Some(Tile::Figurine(FigurineKind::Vostok)));
        game.note_figurines();
        assert_eq!(figurine_notices(&game.drain_events()), vec![FigurineKind::Vostok]);

        game.grid.set(Pos::new(0, 0), Some(Tile::Figurine(FigurineKind::Belka)));
        game.note_figurines();
        assert!(figurine_notices(&game.drain_events()).is_empty());
    }

    #[test]
    fn test_reset_forgets_announced_figurines() {
        let grid = Grid::from_rows(&["*AB", "BCA", "CAB"]).unwrap();
        let level = LevelConfig::new(3, 3, 5, &ItemKind::CLASSIC).unwrap();
        let mut game = GameState::with_grid(level, grid, SimpleRng::new(4));
        assert!(game.figurines_seen.contains(&FigurineKind::Belka));
        game.reset();
        let on_board: BTreeSet<FigurineKind> = game
            .grid()
            .cells()
            .iter()
            .filter_map(|c| match c {
                Some(Tile::Figurine(kind)) => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(game.figurines_seen, on_board);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let game = GameState::new(level(8), 5);
        let snap = game.snapshot();
        assert_eq!(snap.width, 5);
        assert_eq!(snap.cells.len(), 25);
        assert_eq!(snap.stats.moves_remaining, 8);
        assert!(snap.playable());
        assert_eq!(snap.cell(Pos::new(0, 0)), game.grid().get(Pos::new(0, 0)).flatten());
        assert!(snap.cells.iter().all(|c| *c != Some(Tile::Obstacle)));
    }
}
