//! Solvability checks - is there at least one swap that makes a match?
//!
//! The search never mutates the grid. A hypothetical swap is evaluated through
//! [`SwapView`], which remaps the two swapped positions on the fly.

use crate::grid::Grid;
use crate::matcher::{matches_through, KindLookup};
use crate::types::{ItemKind, Pos};

/// Read-only view of `grid` with `a` and `b` exchanged.
#[derive(Debug, Clone, Copy)]
pub struct SwapView<'a> {
    grid: &'a Grid,
    a: Pos,
    b: Pos,
}

impl<'a> SwapView<'a> {
    pub fn new(grid: &'a Grid, a: Pos, b: Pos) -> Self {
        Self { grid, a, b }
    }
}

impl KindLookup for SwapView<'_> {
    fn dims(&self) -> (u8, u8) {
        self.grid.dims()
    }

    fn kind_at(&self, pos: Pos) -> Option<ItemKind> {
        let source = if pos == self.a {
            self.b
        } else if pos == self.b {
            self.a
        } else {
            pos
        };
        self.grid.item_kind(source)
    }
}

/// Would swapping `a` and `b` complete a run through either of them?
pub fn swap_creates_match(grid: &Grid, a: Pos, b: Pos) -> bool {
    let view = SwapView::new(grid, a, b);
    matches_through(&view, a) || matches_through(&view, b)
}

/// First valid move in row-major order, testing right then down from each cell.
///
/// Only ordinary items are candidates; obstacles, figurines and empty cells are
/// skipped. Checking right/down is enough because swap validity is symmetric.
pub fn find_valid_move(grid: &Grid) -> Option<(Pos, Pos)> {
    for pos in grid.positions() {
        let Some(kind) = grid.item_kind(pos) else {
            continue;
        };
        let right = Pos::new(pos.row, pos.col + 1);
        let down = Pos::new(pos.row + 1, pos.col);
        for other in [right, down] {
            match grid.item_kind(other) {
                Some(k) if k != kind => {
                    if swap_creates_match(grid, pos, other) {
                        return Some((pos, other));
                    }
                }
                _ => {}
            }
        }
    }
    None
}

pub fn has_valid_move(grid: &Grid) -> bool {
    find_valid_move(grid).is_some()
}
