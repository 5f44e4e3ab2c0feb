//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, level tooling).
//!
//! # Coordinates
//!
//! Grids are addressed by [`Pos`] with `row` growing downward and `col` growing
//! to the right. Row 0 is the top of the board; new tiles enter from there.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_MATCH` | 3 | Shortest run that counts as a match |
//! | `BASE_MATCH_POINTS` | 10 | Points per matched tile, before combo multiplier |
//! | `FIGURINE_BONUS` | 50 | Flat bonus per figurine swept into a removal |
//! | `FIGURINE_SPAWN_PERCENT` | 10 | Chance a spawn becomes a figurine (board has none) |
//! | `REFILL_WILDCARD_PERCENT` | 25 | Chance a refill ignores the anti-match heuristic |
//! | `FILL_ATTEMPTS` | 100 | Retry cap for full-board generation |
//! | `HINT_DELAY_MS` | 5000 | Idle time before a hint is shown |
//! | `TICK_MS` | 16 | Fixed timestep of the terminal runner |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{FigurineKind, ItemKind, Pos, Tile};
//!
//! assert_eq!(ItemKind::from_str("ice_cream"), Some(ItemKind::IceCream));
//! assert_eq!(Tile::from_str("sputnik"), Some(Tile::Figurine(FigurineKind::Sputnik)));
//!
//! let a = Pos::new(2, 3);
//! assert!(a.is_adjacent(Pos::new(2, 4)));
//! assert!(!a.is_adjacent(Pos::new(3, 4)));
//! ```

/// Shortest run of identical items that resolves as a match.
pub const MIN_MATCH: usize = 3;

/// Points per tile in a matched run at combo depth 1.
pub const BASE_MATCH_POINTS: u32 = 10;

/// Flat bonus for every figurine swept into a removal.
pub const FIGURINE_BONUS: u32 = 50;

/// Chance (percent) that a tile creation yields a figurine while none is on the board.
pub const FIGURINE_SPAWN_PERCENT: u32 = 10;

/// Chance (percent) that a refill ignores the anti-match heuristic, allowing cascades.
pub const REFILL_WILDCARD_PERCENT: u32 = 25;

/// Maximum number of full-board generations tried before accepting a board.
pub const FILL_ATTEMPTS: u32 = 100;

/// Idle delay before the hint scheduler highlights a move.
pub const HINT_DELAY_MS: u32 = 5000;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest supported grid dimension (both width and height).
pub const MAX_GRID_DIM: u8 = 16;

/// Default board edge for the built-in level.
pub const DEFAULT_GRID_SIZE: u8 = 8;

/// Default move budget.
pub const DEFAULT_MAX_MOVES: u32 = 30;

/// Ordinary item kinds.
///
/// A level picks a subset of these as its allowed kinds. The order of
/// [`ItemKind::ALL`] also defines the letters used by the compact grid notation
/// (`A` = chicken, `B` = burger, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Chicken,
    Burger,
    Fries,
    Cola,
    Bucket,
    Cookie,
    Drumstick,
    Wing,
    IceCream,
    Donut,
    Cappuccino,
}

impl ItemKind {
    pub const ALL: [ItemKind; 11] = [
        ItemKind::Chicken,
        ItemKind::Burger,
        ItemKind::Fries,
        ItemKind::Cola,
        ItemKind::Bucket,
        ItemKind::Cookie,
        ItemKind::Drumstick,
        ItemKind::Wing,
        ItemKind::IceCream,
        ItemKind::Donut,
        ItemKind::Cappuccino,
    ];

    /// The classic five-kind set used when a level does not name its own.
    pub const CLASSIC: [ItemKind; 5] = [
        ItemKind::Chicken,
        ItemKind::Burger,
        ItemKind::Fries,
        ItemKind::Cola,
        ItemKind::Bucket,
    ];

    /// Parse item kind from its snake_case name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::ItemKind;
    ///
    /// assert_eq!(ItemKind::from_str("Burger"), Some(ItemKind::Burger));
    /// assert_eq!(ItemKind::from_str("cappuccino"), Some(ItemKind::Cappuccino));
    /// assert_eq!(ItemKind::from_str("obstacle"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chicken" => Some(ItemKind::Chicken),
            "burger" => Some(ItemKind::Burger),
            "fries" => Some(ItemKind::Fries),
            "cola" => Some(ItemKind::Cola),
            "bucket" => Some(ItemKind::Bucket),
            "cookie" => Some(ItemKind::Cookie),
            "drumstick" => Some(ItemKind::Drumstick),
            "wing" => Some(ItemKind::Wing),
            "ice_cream" | "icecream" => Some(ItemKind::IceCream),
            "donut" => Some(ItemKind::Donut),
            "cappuccino" => Some(ItemKind::Cappuccino),
            _ => None,
        }
    }

    /// Convert to snake_case string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Chicken => "chicken",
            ItemKind::Burger => "burger",
            ItemKind::Fries => "fries",
            ItemKind::Cola => "cola",
            ItemKind::Bucket => "bucket",
            ItemKind::Cookie => "cookie",
            ItemKind::Drumstick => "drumstick",
            ItemKind::Wing => "wing",
            ItemKind::IceCream => "ice_cream",
            ItemKind::Donut => "donut",
            ItemKind::Cappuccino => "cappuccino",
        }
    }

    /// Letter used by the compact grid notation (`A`..`K`).
    pub fn letter(&self) -> char {
        let idx = ItemKind::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default();
        (b'A' + idx as u8) as char
    }

    /// Inverse of [`ItemKind::letter`].
    pub fn from_letter(ch: char) -> Option<Self> {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        ItemKind::ALL.get((ch as u8 - b'A') as usize).copied()
    }
}

/// Bonus collectible kinds.
///
/// At most one figurine is on the board at a time; each spawn picks its kind
/// uniformly from [`FigurineKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FigurineKind {
    Belka,
    Strelka,
    Sputnik,
    Vostok,
    Spaceship,
}

impl FigurineKind {
    pub const ALL: [FigurineKind; 5] = [
        FigurineKind::Belka,
        FigurineKind::Strelka,
        FigurineKind::Sputnik,
        FigurineKind::Vostok,
        FigurineKind::Spaceship,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "belka" => Some(FigurineKind::Belka),
            "strelka" => Some(FigurineKind::Strelka),
            "sputnik" => Some(FigurineKind::Sputnik),
            "vostok" => Some(FigurineKind::Vostok),
            "spaceship" => Some(FigurineKind::Spaceship),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FigurineKind::Belka => "belka",
            FigurineKind::Strelka => "strelka",
            FigurineKind::Sputnik => "sputnik",
            FigurineKind::Vostok => "vostok",
            FigurineKind::Spaceship => "spaceship",
        }
    }

    /// Headline shown the first time this kind appears in a session.
    pub fn title(&self) -> &'static str {
        match self {
            FigurineKind::Belka => "BELKA",
            FigurineKind::Strelka => "STRELKA",
            FigurineKind::Sputnik => "SPUTNIK",
            FigurineKind::Vostok => "VOSTOK",
            FigurineKind::Spaceship => "ROCKET",
        }
    }

    /// Symbol used by the compact grid notation.
    pub fn symbol(&self) -> char {
        match self {
            FigurineKind::Belka => '*',
            FigurineKind::Strelka => '+',
            FigurineKind::Sputnik => '@',
            FigurineKind::Vostok => '^',
            FigurineKind::Spaceship => '%',
        }
    }

    /// Inverse of [`FigurineKind::symbol`].
    pub fn from_symbol(ch: char) -> Option<Self> {
        FigurineKind::ALL.into_iter().find(|k| k.symbol() == ch)
    }
}

/// Content of an occupied grid position.
///
/// - **Item**: an ordinary, matchable, swappable tile
/// - **Obstacle**: immovable wall; never matches, never moves, never swaps
/// - **Figurine**: rare bonus collectible; moves with gravity but never matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Item(ItemKind),
    Obstacle,
    Figurine(FigurineKind),
}

impl Tile {
    /// Parse a tile from its name. Item names map to [`Tile::Item`], figurine
    /// names to [`Tile::Figurine`].
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "obstacle" => Some(Tile::Obstacle),
            other => ItemKind::from_str(other)
                .map(Tile::Item)
                .or_else(|| FigurineKind::from_str(other).map(Tile::Figurine)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tile::Item(kind) => kind.as_str(),
            Tile::Obstacle => "obstacle",
            Tile::Figurine(kind) => kind.as_str(),
        }
    }

    pub fn is_figurine(&self) -> bool {
        matches!(self, Tile::Figurine(_))
    }

    /// The ordinary kind, if this tile can take part in a match.
    pub fn item_kind(&self) -> Option<ItemKind> {
        match self {
            Tile::Item(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether gravity and horizontal pulls may move this tile.
    pub fn is_movable(&self) -> bool {
        !matches!(self, Tile::Obstacle)
    }
}

/// A grid position
///
/// - `None`: Empty slot (awaiting gravity or refill)
/// - `Some(Tile)`: Occupied slot
pub type Cell = Option<Tile>;

/// Row/column address on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when the two positions share an edge (Manhattan distance 1).
    pub fn is_adjacent(&self, other: Pos) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }

    /// Orthogonal neighbours inside a `width x height` grid (up, down, left, right).
    pub fn neighbors(&self, width: u8, height: u8) -> impl Iterator<Item = Pos> {
        let Pos { row, col } = *self;
        [
            row.checked_sub(1).map(|r| Pos::new(r, col)),
            (row + 1 < height).then(|| Pos::new(row + 1, col)),
            col.checked_sub(1).map(|c| Pos::new(row, c)),
            (col + 1 < width).then(|| Pos::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Orientation of a detected run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Visual cue emitted by the special effect resolver.
///
/// Cues carry no semantics beyond what has already been applied to the grid;
/// renderers use them to pick an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCue {
    /// A 4-run cleared its whole row (horizontal) or column (vertical).
    LineClear {
        orientation: Orientation,
        index: u8,
    },
    /// A 5+ run cleared every tile of its kind.
    ClearAllOfType { kind: ItemKind, centroid: Pos },
    /// Two or more plain 3-runs resolved in the same pass.
    DoubleMatch,
}

/// Player intents accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Swap two (adjacent) positions.
    Swap(Pos, Pos),
    /// Regenerate the board and restart the session.
    Reset,
}
