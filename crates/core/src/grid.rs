//! Grid module - the board matrix
//!
//! The grid is a `width x height` matrix of [`Cell`]s stored as a flat,
//! row-major `Vec`. It is pure data: bounds-checked access and mutation only,
//! no game rules. Obstacles are stored in-line as [`Tile::Obstacle`] so every
//! pass sees the same matrix the player sees.
//!
//! # Notation
//!
//! [`Grid::from_rows`] / [`Grid::to_rows`] use a compact one-char-per-cell text
//! form that keeps tests readable:
//!
//! | Char | Cell |
//! |------|------|
//! | `A`..`K` | ordinary item, in [`ItemKind::ALL`] order |
//! | `#` | obstacle |
//! | `*` `+` `@` `^` `%` | figurine, in [`FigurineKind::ALL`] order |
//! | `.` | empty |

use thiserror::Error;

use crate::matcher::KindLookup;
use crate::types::{Cell, FigurineKind, ItemKind, Pos, Tile, MAX_GRID_DIM};

/// Errors from parsing the compact grid notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("grid must have between 1 and {max} rows and columns")]
    InvalidDimensions { max: u8 },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("unknown cell symbol {symbol:?} at row {row}, col {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}

/// The playing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Create an empty grid with obstacles already placed.
    /// Positions outside the grid are ignored.
    pub fn with_obstacles(width: u8, height: u8, obstacles: &[Pos]) -> Self {
        let mut grid = Self::new(width, height);
        for &pos in obstacles {
            grid.set(pos, Some(Tile::Obstacle));
        }
        grid
    }

    /// Parse the compact row notation (see module docs).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_core::Grid;
    /// use tui_match3_core::types::{ItemKind, Pos, Tile};
    ///
    /// let grid = Grid::from_rows(&["AB#", ".*C"]).unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.tile(Pos::new(0, 1)), Some(Tile::Item(ItemKind::Burger)));
    /// assert!(grid.is_obstacle(Pos::new(0, 2)));
    /// assert!(grid.is_empty(Pos::new(1, 0)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridParseError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let max = MAX_GRID_DIM as usize;
        if height == 0 || width == 0 || height > max || width > max {
            return Err(GridParseError::InvalidDimensions { max: MAX_GRID_DIM });
        }

        let mut grid = Self::new(width as u8, height as u8);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                return Err(GridParseError::RaggedRow {
                    row,
                    len,
                    expected: width,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '.' => None,
                    '#' => Some(Tile::Obstacle),
                    other => {
                        let tile = ItemKind::from_letter(other)
                            .map(Tile::Item)
                            .or_else(|| FigurineKind::from_symbol(other).map(Tile::Figurine));
                        if tile.is_none() {
                            return Err(GridParseError::UnknownSymbol {
                                symbol: other,
                                row,
                                col,
                            });
                        }
                        tile
                    }
                };
                grid.set(Pos::new(row as u8, col as u8), cell);
            }
        }
        Ok(grid)
    }

    /// Render to the compact row notation.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| match self.tile(Pos::new(row, col)) {
                        None => '.',
                        Some(Tile::Obstacle) => '#',
                        Some(Tile::Figurine(kind)) => kind.symbol(),
                        Some(Tile::Item(kind)) => kind.letter(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        Some(pos.row as usize * self.width as usize + pos.col as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Tile at position; `None` for empty or out of bounds.
    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        self.get(pos).flatten()
    }

    /// Ordinary kind at position (obstacles and figurines yield `None`).
    pub fn item_kind(&self, pos: Pos) -> Option<ItemKind> {
        self.tile(pos).and_then(|t| t.item_kind())
    }

    pub fn is_obstacle(&self, pos: Pos) -> bool {
        matches!(self.tile(pos), Some(Tile::Obstacle))
    }

    /// In bounds and holding nothing.
    pub fn is_empty(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// True when an obstacle sits anywhere above `pos` in its column.
    pub fn has_obstacle_above(&self, pos: Pos) -> bool {
        (0..pos.row).any(|row| self.is_obstacle(Pos::new(row, pos.col)))
    }

    /// Exchange two cells. Returns false (and changes nothing) if either is out of bounds.
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
    }

    /// Raw row-major cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn figurine_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Some(Tile::Figurine(_))))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Remove every non-obstacle tile. Returns how many were removed.
    pub fn clear_tiles(&mut self) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if matches!(cell, Some(t) if t.is_movable()) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }
}

impl KindLookup for Grid {
    fn dims(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    fn kind_at(&self, pos: Pos) -> Option<ItemKind> {
        self.item_kind(pos)
    }
}
