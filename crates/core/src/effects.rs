//! Special effect resolver - turns one detection pass into a removal set
//!
//! | Run length | Extra removal | Cue |
//! |------------|---------------|-----|
//! | 3 | none | `DoubleMatch` once, if 2+ plain runs and no 4/5 in the pass |
//! | 4 | every ordinary tile in the run's row (horizontal) or column (vertical) | `LineClear` |
//! | 5+ | every ordinary tile of the run's kind | `ClearAllOfType` at the run's centre |
//!
//! The per-group sets are unioned, so each cell is removed at most once.
//! Figurines orthogonally adjacent to the union are swept in afterwards.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::MatchGroup;
use crate::types::{EffectCue, Orientation, Pos, Tile};

/// Everything one detection pass removes, plus the cues it raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub groups: Vec<MatchGroup>,
    /// Ordinary cells to remove, row-major, without duplicates.
    pub cells: Vec<Pos>,
    /// Figurines swept in by adjacency, row-major.
    pub figurines: Vec<Pos>,
    pub cues: Vec<EffectCue>,
    pub four_matches: u32,
    pub five_matches: u32,
    pub double_match: bool,
}

impl Resolution {
    /// Every removed position (ordinary cells and figurines).
    pub fn removed(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().chain(self.figurines.iter()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.figurines.is_empty()
    }
}

/// Classify each group and compute the unioned removal set.
pub fn resolve(grid: &Grid, groups: Vec<MatchGroup>) -> Resolution {
    let mut cells: BTreeSet<Pos> = BTreeSet::new();
    let mut cues = Vec::new();
    let mut four_matches = 0;
    let mut five_matches = 0;
    let mut plain = 0;

    for group in &groups {
        cells.extend(group.positions());

        match group.len {
            0..=3 => plain += 1,
            4 => {
                four_matches += 1;
                // A u8 dimension always fits.
                let line: ArrayVec<Pos, { u8::MAX as usize }> = match group.orientation {
                    Orientation::Horizontal => (0..grid.width())
                        .map(|col| Pos::new(group.anchor.row, col))
                        .collect(),
                    Orientation::Vertical => (0..grid.height())
                        .map(|row| Pos::new(row, group.anchor.col))
                        .collect(),
                };
                cells.extend(line.into_iter().filter(|&p| grid.item_kind(p).is_some()));
                cues.push(EffectCue::LineClear {
                    orientation: group.orientation,
                    index: group.line_index(),
                });
            }
            _ => {
                five_matches += 1;
                cells.extend(
                    grid.positions()
                        .filter(|&p| grid.item_kind(p) == Some(group.kind)),
                );
                cues.push(EffectCue::ClearAllOfType {
                    kind: group.kind,
                    centroid: group.center(),
                });
            }
        }
    }

    let double_match = plain >= 2 && four_matches == 0 && five_matches == 0;
    if double_match {
        cues.push(EffectCue::DoubleMatch);
    }

    let figurines: BTreeSet<Pos> = cells
        .iter()
        .flat_map(|p| p.neighbors(grid.width(), grid.height()))
        .filter(|&n| matches!(grid.tile(n), Some(Tile::Figurine(_))))
        .collect();

    Resolution {
        groups,
        cells: cells.into_iter().collect(),
        figurines: figurines.into_iter().collect(),
        cues,
        four_matches,
        five_matches,
        double_match,
    }
}
