//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the single match-3 engine. It has **no dependencies** on UI or
//! terminal I/O, making it:
//!
//! - **Deterministic**: the random source is injected; same seed, same session
//! - **Testable**: every rule is reachable from unit tests without a renderer
//! - **Portable**: renderers only read snapshots and events, never the grid
//!
//! # Module Structure
//!
//! - [`grid`]: flat row-major board with bounds-checked access
//! - [`matcher`]: horizontal/vertical run detection
//! - [`effects`]: 4-run line clears, 5-run clear-all, figurine sweep, cues
//! - [`cascade`]: segmented gravity, horizontal pull under obstacles, refill
//! - [`fill`]: match-avoiding generation and the figurine spawn rule
//! - [`solver`]: valid-move search through a non-mutating swap view
//! - [`scoring`]: points, session stats, objectives and stars
//! - [`hint`]: idle timer that surfaces a valid move
//! - [`level`]: JSON level configuration
//! - [`events`]: output events and the observer trait
//! - [`game_state`]: the session state machine
//!
//! # Game Rules
//!
//! - **Swaps** must be between orthogonal neighbours, must not touch an
//!   obstacle, and must produce a run; otherwise no move is consumed
//! - **Runs** of 3 score `10 x len x combo`; runs of 4 clear their row or
//!   column; runs of 5+ clear every tile of their kind
//! - **Figurines** never match; one next to a removed cell is collected for +50
//! - **Cascades** repeat removal, gravity, pull and refill; each extra pass
//!   raises the combo multiplier
//! - **Solvability**: a settled board always has a move, or it is reshuffled once
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{GameState, LevelConfig, Phase};
//!
//! let mut game = GameState::new(LevelConfig::default(), 12345);
//! assert_eq!(game.phase(), Phase::Idle);
//!
//! // The engine always leaves at least one valid move on a fresh board.
//! let (a, b) = tui_match3_core::find_valid_move(game.grid()).unwrap();
//! game.attempt_swap(a, b);
//!
//! assert!(game.score() >= 30);
//! assert_eq!(game.moves_remaining(), 29);
//! ```
//!
//! # Timing
//!
//! Only the hint timer depends on time. Call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! milliseconds.

pub mod cascade;
pub mod effects;
pub mod events;
pub mod fill;
pub mod game_state;
pub mod grid;
pub mod hint;
pub mod level;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod solver;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{CascadeStep, Spawn, TileMove};
pub use effects::Resolution;
pub use events::{GameEvent, GameObserver};
pub use fill::{fill_board, FillOutcome};
pub use game_state::{GameState, Phase, RejectReason, SwapOutcome, TurnReport};
pub use grid::{Grid, GridParseError};
pub use hint::HintScheduler;
pub use level::{LevelConfig, LevelError};
pub use matcher::{find_matches, is_quiescent, MatchGroup};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{
    ComboCounts, ComboKind, GameOverReport, ObjectiveProgress, Objectives, SessionResult, Stats,
    TargetKind, TargetProgress, Targets,
};
pub use snapshot::GameSnapshot;
pub use solver::{find_valid_move, has_valid_move};
