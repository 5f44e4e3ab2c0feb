//! Cascade resolver - gravity, horizontal pull and refill
//!
//! After a removal the board is settled in three phases:
//!
//! 1. **Gravity**: obstacles split each column into segments; surviving tiles
//!    in a segment compact to its bottom, keeping their order.
//! 2. **Horizontal pull**: an empty cell whose first non-empty cell above is an
//!    obstacle can never be fed from the top. It pulls the nearest movable tile
//!    from an open column in the same row (distance 1, 2, ... with left before
//!    right), never scanning past an obstacle. Gravity runs again after every
//!    pull iteration.
//! 3. **Refill**: each column gets new tiles from row 0 down to the first
//!    non-empty cell.
//!
//! Pull and refill alternate until neither changes anything, so capped cells
//! keep drawing from open columns as long as a source is reachable. Cells with
//! no reachable source stay empty.
//!
//! Every phase records what it did as a [`CascadeStep`], so a renderer can
//! replay a whole turn as animation after the engine has already settled it.

use log::debug;

use crate::grid::Grid;
use crate::fill::{new_tile, FillMode};
use crate::rng::RandomSource;
use crate::types::{ItemKind, Pos, Tile};

/// A tile travelling from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub from: Pos,
    pub to: Pos,
    pub tile: Tile,
}

/// A newly created tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub pos: Pos,
    pub tile: Tile,
}

/// One replayable step of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeStep {
    /// The player's swap was applied.
    Swapped { a: Pos, b: Pos },
    /// A detection pass removed cells.
    Removed {
        combo: u32,
        points: u32,
        cells: Vec<Pos>,
        figurines: Vec<Pos>,
    },
    Fell(Vec<TileMove>),
    Pulled(Vec<TileMove>),
    Spawned(Vec<Spawn>),
    /// The whole board was regenerated.
    Reshuffled { attempts: u32, solvable: bool },
}

/// Compact every column segment toward its bottom.
pub fn apply_gravity(grid: &mut Grid) -> Vec<TileMove> {
    let mut moves = Vec::new();
    for col in 0..grid.width() {
        // Lowest empty cell of the current segment not yet filled.
        let mut write: Option<u8> = None;
        for row in (0..grid.height()).rev() {
            let pos = Pos::new(row, col);
            match grid.tile(pos) {
                Some(Tile::Obstacle) => write = None,
                Some(tile) => {
                    if let Some(w) = write {
                        let to = Pos::new(w, col);
                        grid.set(to, Some(tile));
                        grid.set(pos, None);
                        moves.push(TileMove { from: pos, to, tile });
                        write = Some(w - 1);
                    }
                }
                None => {
                    if write.is_none() {
                        write = Some(row);
                    }
                }
            }
        }
    }
    moves
}

/// Empty cell that cannot be fed from above: its first non-empty cell upward is an obstacle.
pub fn is_pull_target(grid: &Grid, pos: Pos) -> bool {
    if !grid.is_empty(pos) {
        return false;
    }
    (0..pos.row)
        .rev()
        .map(|row| grid.tile(Pos::new(row, pos.col)))
        .find(|tile| tile.is_some())
        .flatten()
        == Some(Tile::Obstacle)
}

/// Nearest pull source for `target`, scanning outward and stopping at obstacles.
pub fn find_pull_source(grid: &Grid, target: Pos) -> Option<Pos> {
    let mut left_open = true;
    let mut right_open = true;
    for distance in 1..grid.width() {
        let left = target.col.checked_sub(distance).map(|c| Pos::new(target.row, c));
        let right = Some(target.col + distance)
            .filter(|&c| c < grid.width())
            .map(|c| Pos::new(target.row, c));

        for (side, open) in [(left, &mut left_open), (right, &mut right_open)] {
            if !*open {
                continue;
            }
            let Some(pos) = side else {
                *open = false;
                continue;
            };
            match grid.tile(pos) {
                Some(Tile::Obstacle) => *open = false,
                Some(_) if !grid.has_obstacle_above(pos) => return Some(pos),
                _ => {}
            }
        }

        if !left_open && !right_open {
            break;
        }
    }
    None
}

/// One horizontal pull iteration over every target, row-major.
pub fn horizontal_pull(grid: &mut Grid) -> Vec<TileMove> {
    let targets: Vec<Pos> = grid.positions().filter(|&p| is_pull_target(grid, p)).collect();
    let mut moves = Vec::new();
    for to in targets {
        if !is_pull_target(grid, to) {
            continue;
        }
        let Some(from) = find_pull_source(grid, to) else {
            continue;
        };
        let Some(tile) = grid.tile(from) else {
            continue;
        };
        grid.set(to, Some(tile));
        grid.set(from, None);
        moves.push(TileMove { from, to, tile });
    }
    moves
}

/// Fill each column from row 0 down to its first non-empty cell.
pub fn refill<R: RandomSource>(grid: &mut Grid, kinds: &[ItemKind], rng: &mut R) -> Vec<Spawn> {
    let mut spawned = Vec::new();
    for col in 0..grid.width() {
        for row in 0..grid.height() {
            let pos = Pos::new(row, col);
            if !grid.is_empty(pos) {
                break;
            }
            let tile = new_tile(grid, pos, kinds, rng, FillMode::Refill);
            grid.set(pos, Some(tile));
            spawned.push(Spawn { pos, tile });
        }
    }
    spawned
}

/// Run gravity, pull and refill until the board stops changing.
pub fn settle<R: RandomSource>(
    grid: &mut Grid,
    kinds: &[ItemKind],
    rng: &mut R,
    steps: &mut Vec<CascadeStep>,
) {
    let cap = grid.width() as usize * grid.height() as usize + 1;

    for round in 0..cap {
        let fell = apply_gravity(grid);
        if !fell.is_empty() {
            steps.push(CascadeStep::Fell(fell));
        }

        let mut pulled_any = false;
        for _ in 0..cap {
            let pulled = horizontal_pull(grid);
            if pulled.is_empty() {
                break;
            }
            pulled_any = true;
            steps.push(CascadeStep::Pulled(pulled));
            let fell = apply_gravity(grid);
            if !fell.is_empty() {
                steps.push(CascadeStep::Fell(fell));
            }
        }

        let spawned = refill(grid, kinds, rng);
        let spawned_any = !spawned.is_empty();
        if spawned_any {
            steps.push(CascadeStep::Spawned(spawned));
        }

        if !pulled_any && !spawned_any {
            debug!("settled after {} round(s)", round + 1);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_gravity_compacts_open_column() {
        let mut g = grid(&["A", ".", "B", "."]);
        let moves = apply_gravity(&mut g);
        assert_eq!(g.to_rows(), vec![".", ".", "A", "B"]);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].from, Pos::new(2, 0));
        assert_eq!(moves[0].to, Pos::new(3, 0));
    }

    #[test]
    fn test_gravity_respects_obstacle_segments() {
        let mut g = grid(&["A", ".", "#", "B", "."]);
        apply_gravity(&mut g);
        assert_eq!(g.to_rows(), vec![".", "A", "#", ".", "B"]);
    }

    #[test]
    fn test_gravity_moves_figurines() {
        let mut g = grid(&["*", "."]);
        apply_gravity(&mut g);
        assert_eq!(g.to_rows(), vec![".", "*"]);
    }

    #[test]
    fn test_pull_target_detection() {
        let g = grid(&["#.", "..", "AB"]);
        assert!(is_pull_target(&g, Pos::new(1, 0)));
        assert!(!is_pull_target(&g, Pos::new(1, 1)));
        assert!(!is_pull_target(&g, Pos::new(0, 1)));
    }

    #[test]
    fn test_pull_prefers_left_then_right() {
        let g = grid(&["..#..", "AB.CD"]);
        assert_eq!(find_pull_source(&g, Pos::new(1, 2)), Some(Pos::new(1, 1)));

        let g = grid(&["..#..", "A..CD"]);
        assert_eq!(find_pull_source(&g, Pos::new(1, 2)), Some(Pos::new(1, 3)));
    }

    #[test]
    fn test_pull_stops_at_obstacle() {
        let g = grid(&["A.#.A", "A##.A"]);
        assert_eq!(find_pull_source(&g, Pos::new(1, 3)), Some(Pos::new(1, 4)));
        let g = grid(&["A.#.#", "A##.#"]);
        assert_eq!(find_pull_source(&g, Pos::new(1, 3)), None);
    }

    #[test]
    fn test_pull_skips_capped_columns() {
        // Column 1 holds a tile but is itself capped by an obstacle.
        let g = grid(&["##.", ".BC"]);
        assert_eq!(find_pull_source(&g, Pos::new(1, 0)), Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_settle_fills_capped_cells_from_open_columns() {
        let mut g = grid(&[".#.", "...", "A.B"]);
        let mut rng = SimpleRng::new(9);
        let mut steps = Vec::new();
        settle(&mut g, &[ItemKind::Chicken, ItemKind::Burger, ItemKind::Fries], &mut rng, &mut steps);

        assert_eq!(g.empty_count(), 0);
        assert!(g.is_obstacle(Pos::new(0, 1)));
        assert!(steps.iter().any(|s| matches!(s, CascadeStep::Pulled(_))));
        assert!(steps.iter().any(|s| matches!(s, CascadeStep::Spawned(_))));
    }

    #[test]
    fn test_settle_leaves_enclosed_cells_empty() {
        let mut g = grid(&["A#A", "#.#", "A#A"]);
        let mut rng = SimpleRng::new(1);
        let mut steps = Vec::new();
        settle(&mut g, &ItemKind::CLASSIC, &mut rng, &mut steps);
        assert!(g.is_empty(Pos::new(1, 1)));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_refill_stops_at_first_tile() {
        let mut g = grid(&["..", "A.", "#."]);
        let mut rng = SimpleRng::new(3);
        let spawned = refill(&mut g, &ItemKind::CLASSIC, &mut rng);
        let positions: Vec<Pos> = spawned.iter().map(|s| s.pos).collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1), Pos::new(2, 1)]
        );
    }
}
