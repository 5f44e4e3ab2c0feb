//! Match detection - horizontal and vertical runs of identical items
//!
//! Detection is read-only. Runs are maximal: a scan starts only on a cell not
//! yet claimed by a run of the same orientation, so a 5-run is reported once,
//! never as three overlapping 3-runs. Claims are per orientation, which lets
//! L/T/+ shapes report one group for each line through the shared cell.

use crate::types::{ItemKind, Orientation, Pos, MIN_MATCH};

/// Read access to ordinary kinds, shared by the real grid and hypothetical views.
pub trait KindLookup {
    /// `(width, height)`
    fn dims(&self) -> (u8, u8);

    /// Ordinary kind at `pos`; `None` for empty, obstacle, figurine or out of bounds.
    fn kind_at(&self, pos: Pos) -> Option<ItemKind>;
}

/// One maximal run of identical ordinary items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchGroup {
    pub kind: ItemKind,
    pub orientation: Orientation,
    /// Leftmost (horizontal) or topmost (vertical) cell.
    pub anchor: Pos,
    pub len: u8,
}

impl MatchGroup {
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let MatchGroup {
            anchor,
            orientation,
            len,
            ..
        } = *self;
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Pos::new(anchor.row, anchor.col + i),
            Orientation::Vertical => Pos::new(anchor.row + i, anchor.col),
        })
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Middle cell of the run (`positions[len / 2]`), used to place effects.
    pub fn center(&self) -> Pos {
        let offset = self.len / 2;
        match self.orientation {
            Orientation::Horizontal => Pos::new(self.anchor.row, self.anchor.col + offset),
            Orientation::Vertical => Pos::new(self.anchor.row + offset, self.anchor.col),
        }
    }

    /// The row (horizontal) or column (vertical) the run lies on.
    pub fn line_index(&self) -> u8 {
        match self.orientation {
            Orientation::Horizontal => self.anchor.row,
            Orientation::Vertical => self.anchor.col,
        }
    }
}

/// Step one cell along an orientation, staying inside `dims`.
fn step(pos: Pos, orientation: Orientation, dims: (u8, u8)) -> Option<Pos> {
    let (width, height) = dims;
    match orientation {
        Orientation::Horizontal if pos.col + 1 < width => Some(Pos::new(pos.row, pos.col + 1)),
        Orientation::Vertical if pos.row + 1 < height => Some(Pos::new(pos.row + 1, pos.col)),
        _ => None,
    }
}

/// Length of the run of `kind` starting at `start` and extending forward.
fn run_length<L: KindLookup>(view: &L, start: Pos, kind: ItemKind, orientation: Orientation) -> u8 {
    let dims = view.dims();
    let mut len = 1;
    let mut cursor = start;
    while let Some(next) = step(cursor, orientation, dims) {
        if view.kind_at(next) != Some(kind) {
            break;
        }
        len += 1;
        cursor = next;
    }
    len
}

/// Find every run of `MIN_MATCH` or more.
///
/// Groups come back in row-major order of their anchors; when a horizontal and a
/// vertical run share an anchor the horizontal one is listed first.
pub fn find_matches<L: KindLookup>(view: &L) -> Vec<MatchGroup> {
    let (width, height) = view.dims();
    let idx = |p: Pos| p.row as usize * width as usize + p.col as usize;
    let mut claimed_h = vec![false; width as usize * height as usize];
    let mut claimed_v = vec![false; width as usize * height as usize];
    let mut groups = Vec::new();
    let reach = (MIN_MATCH - 1) as u8;

    for row in 0..height {
        for col in 0..width {
            let pos = Pos::new(row, col);
            let Some(kind) = view.kind_at(pos) else {
                continue;
            };

            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let (claimed, fits) = match orientation {
                    Orientation::Horizontal => (&mut claimed_h, col + reach < width),
                    Orientation::Vertical => (&mut claimed_v, row + reach < height),
                };
                if !fits || claimed[idx(pos)] {
                    continue;
                }
                let len = run_length(view, pos, kind, orientation);
                if (len as usize) < MIN_MATCH {
                    continue;
                }
                let group = MatchGroup {
                    kind,
                    orientation,
                    anchor: pos,
                    len,
                };
                for p in group.positions() {
                    claimed[idx(p)] = true;
                }
                groups.push(group);
            }
        }
    }

    groups
}

/// True if a run of `MIN_MATCH` or more passes through `pos`.
pub fn matches_through<L: KindLookup>(view: &L, pos: Pos) -> bool {
    let Some(kind) = view.kind_at(pos) else {
        return false;
    };
    let count = |dr: i8, dc: i8| {
        let mut n = 0usize;
        let mut row = pos.row as i16;
        let mut col = pos.col as i16;
        loop {
            row += dr as i16;
            col += dc as i16;
            if row < 0 || col < 0 {
                break;
            }
            if view.kind_at(Pos::new(row as u8, col as u8)) != Some(kind) {
                break;
            }
            n += 1;
        }
        n
    };
    let horizontal = 1 + count(0, -1) + count(0, 1);
    let vertical = 1 + count(-1, 0) + count(1, 0);
    horizontal >= MIN_MATCH || vertical >= MIN_MATCH
}

/// True if the grid has no run anywhere.
pub fn is_quiescent<L: KindLookup>(view: &L) -> bool {
    find_matches(view).is_empty()
}
