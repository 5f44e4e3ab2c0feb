//! Tile generation - initial fill, refill picks and the figurine rule
//!
//! Two heuristics pick ordinary kinds:
//!
//! - **Initial fill** runs row-major, so only the left and upper neighbours
//!   exist. It excludes the kind of a matching left pair and of a matching up
//!   pair, which makes every generated board match-free.
//! - **Refill** runs after gravity, so neighbours may sit on any side. With
//!   `REFILL_WILDCARD_PERCENT` chance it picks freely (emergent cascades);
//!   otherwise it excludes kinds that would complete a left pair, right pair,
//!   left/right sandwich, up pair, down pair or up/down sandwich.
//!
//! Before either heuristic, every creation rolls for a figurine, but only while
//! the board holds none. A figurine's kind is a uniform pick over
//! [`FigurineKind::ALL`].

use log::{debug, warn};

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::solver::has_valid_move;
use crate::matcher::is_quiescent;
use crate::types::{
    FigurineKind, ItemKind, Pos, Tile, FIGURINE_SPAWN_PERCENT, FILL_ATTEMPTS,
    REFILL_WILDCARD_PERCENT,
};

/// Which heuristic a tile creation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Initial,
    Refill,
}

/// Result of [`fill_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Number of boards generated, 1..=FILL_ATTEMPTS.
    pub attempts: u32,
    /// False when the retry cap ran out without a board that has a valid move.
    pub solvable: bool,
}

fn offset(pos: Pos, dr: i8, dc: i8) -> Option<Pos> {
    let row = pos.row as i16 + dr as i16;
    let col = pos.col as i16 + dc as i16;
    if row < 0 || col < 0 || row > u8::MAX as i16 || col > u8::MAX as i16 {
        return None;
    }
    Some(Pos::new(row as u8, col as u8))
}

/// Kind shared by the two cells at the given offsets, if both hold the same item.
fn pair_kind(grid: &Grid, pos: Pos, first: (i8, i8), second: (i8, i8)) -> Option<ItemKind> {
    let a = offset(pos, first.0, first.1).and_then(|p| grid.item_kind(p))?;
    let b = offset(pos, second.0, second.1).and_then(|p| grid.item_kind(p))?;
    (a == b).then_some(a)
}

fn pick_excluding<R: RandomSource>(
    kinds: &[ItemKind],
    excluded: &[ItemKind],
    rng: &mut R,
) -> ItemKind {
    let pool: Vec<ItemKind> = kinds
        .iter()
        .copied()
        .filter(|k| !excluded.contains(k))
        .collect();
    rng.pick(&pool)
        .or_else(|| rng.pick(kinds))
        .unwrap_or(ItemKind::Chicken)
}

/// Kind for a cell during the row-major initial fill.
pub fn initial_kind<R: RandomSource>(
    grid: &Grid,
    pos: Pos,
    kinds: &[ItemKind],
    rng: &mut R,
) -> ItemKind {
    let excluded: Vec<ItemKind> = [
        pair_kind(grid, pos, (0, -1), (0, -2)),
        pair_kind(grid, pos, (-1, 0), (-2, 0)),
    ]
    .into_iter()
    .flatten()
    .collect();
    pick_excluding(kinds, &excluded, rng)
}

/// Kind for a cell created by refill.
pub fn refill_kind<R: RandomSource>(
    grid: &Grid,
    pos: Pos,
    kinds: &[ItemKind],
    rng: &mut R,
) -> ItemKind {
    if rng.roll_percent(REFILL_WILDCARD_PERCENT) {
        return pick_excluding(kinds, &[], rng);
    }
    let excluded: Vec<ItemKind> = [
        pair_kind(grid, pos, (0, -1), (0, -2)),
        pair_kind(grid, pos, (0, 1), (0, 2)),
        pair_kind(grid, pos, (0, -1), (0, 1)),
        pair_kind(grid, pos, (-1, 0), (-2, 0)),
        pair_kind(grid, pos, (1, 0), (2, 0)),
        pair_kind(grid, pos, (-1, 0), (1, 0)),
    ]
    .into_iter()
    .flatten()
    .collect();
    pick_excluding(kinds, &excluded, rng)
}

/// Create one tile for `pos`, rolling for a figurine first.
pub fn new_tile<R: RandomSource>(
    grid: &Grid,
    pos: Pos,
    kinds: &[ItemKind],
    rng: &mut R,
    mode: FillMode,
) -> Tile {
    if grid.figurine_count() == 0 && rng.roll_percent(FIGURINE_SPAWN_PERCENT) {
        let kind = rng.pick(&FigurineKind::ALL).unwrap_or(FigurineKind::Belka);
        return Tile::Figurine(kind);
    }
    let kind = match mode {
        FillMode::Initial => initial_kind(grid, pos, kinds, rng),
        FillMode::Refill => refill_kind(grid, pos, kinds, rng),
    };
    Tile::Item(kind)
}

/// Clear every non-obstacle cell and fill it again, row-major.
pub fn fill_once<R: RandomSource>(grid: &mut Grid, kinds: &[ItemKind], rng: &mut R) {
    grid.clear_tiles();
    let targets: Vec<Pos> = grid.positions().filter(|&p| grid.is_empty(p)).collect();
    for pos in targets {
        let tile = new_tile(grid, pos, kinds, rng, FillMode::Initial);
        grid.set(pos, Some(tile));
    }
}

/// Generate a match-free board that has at least one valid move.
///
/// Retries up to `FILL_ATTEMPTS` times. If every attempt is dead the last
/// attempt stays on the grid (it is still match-free) and the outcome reports
/// `solvable: false`.
pub fn fill_board<R: RandomSource>(grid: &mut Grid, kinds: &[ItemKind], rng: &mut R) -> FillOutcome {
    for attempt in 1..=FILL_ATTEMPTS {
        fill_once(grid, kinds, rng);
        if is_quiescent(grid) && has_valid_move(grid) {
            debug!("board filled after {attempt} attempt(s)");
            return FillOutcome {
                attempts: attempt,
                solvable: true,
            };
        }
    }
    warn!(
        "no solvable {}x{} board after {} attempts, keeping the last one",
        grid.width(),
        grid.height(),
        FILL_ATTEMPTS
    );
    FillOutcome {
        attempts: FILL_ATTEMPTS,
        solvable: false,
    }
}
