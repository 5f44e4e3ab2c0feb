//! Level configuration
//!
//! Levels are JSON documents. Both the backend field names and the camelCase
//! names used by the game front end are accepted:
//!
//! ```json
//! {
//!   "name": "In Orbit",
//!   "grid_width": 7, "grid_height": 7, "max_moves": 24,
//!   "item_types": ["drumstick", "wing", "burger", "fries", "bucket"],
//!   "obstacles": [{"row": 1, "col": 3}],
//!   "targets": {"collect": {"bucket": 5}, "min_score": 1000, "combos": {"4_match": 2}}
//! }
//! ```
//!
//! Omitted fields fall back to a 7x7 board, 30 moves, the classic five kinds,
//! no obstacles and no targets. The configuration is immutable for a session.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;

use crate::scoring::{ComboKind, Targets};
use crate::types::{ItemKind, Pos, Tile, DEFAULT_GRID_SIZE, DEFAULT_MAX_MOVES, MAX_GRID_DIM, MIN_MATCH};

/// Board edge used when a level file leaves out its dimensions.
const LEVEL_FILE_GRID_SIZE: u8 = 7;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid {width}x{height} is outside 3..={max}", max = MAX_GRID_DIM)]
    InvalidDimensions { width: u32, height: u32 },
    #[error("level needs at least 3 distinct item kinds, got {0}")]
    TooFewKinds(usize),
    #[error("unknown item kind {0:?}")]
    UnknownKind(String),
    #[error("obstacle at row {row}, col {col} is outside the grid")]
    ObstacleOutOfBounds { row: u32, col: u32 },
    #[error("unknown target {0:?}")]
    UnknownTarget(String),
}

#[derive(Debug, Deserialize)]
struct RawPos {
    row: u32,
    col: u32,
}

#[derive(Debug, Default, Deserialize)]
struct RawTargets {
    #[serde(default)]
    collect: BTreeMap<String, u32>,
    #[serde(default, alias = "minScore")]
    min_score: Option<u32>,
    #[serde(default)]
    combos: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_dim", alias = "width")]
    grid_width: u32,
    #[serde(default = "default_dim", alias = "height")]
    grid_height: u32,
    #[serde(default = "default_moves", alias = "maxMoves")]
    max_moves: u32,
    #[serde(default = "default_kinds", alias = "allowedKinds")]
    item_types: Vec<String>,
    #[serde(default)]
    obstacles: Vec<RawPos>,
    #[serde(default)]
    targets: RawTargets,
}

fn default_dim() -> u32 {
    LEVEL_FILE_GRID_SIZE as u32
}

fn default_moves() -> u32 {
    DEFAULT_MAX_MOVES
}

fn default_kinds() -> Vec<String> {
    ItemKind::CLASSIC.iter().map(|k| k.as_str().to_string()).collect()
}

/// Validated, immutable level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub name: String,
    pub width: u8,
    pub height: u8,
    pub max_moves: u32,
    /// Distinct allowed kinds, in the order the level listed them.
    pub kinds: Vec<ItemKind>,
    /// Obstacle positions, row-major, without duplicates.
    pub obstacles: Vec<Pos>,
    pub targets: Targets,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: "Classic".to_string(),
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            max_moves: DEFAULT_MAX_MOVES,
            kinds: ItemKind::CLASSIC.to_vec(),
            obstacles: Vec::new(),
            targets: Targets::default(),
        }
    }
}

impl LevelConfig {
    /// Build and validate a level in code.
    pub fn new(width: u8, height: u8, max_moves: u32, kinds: &[ItemKind]) -> Result<Self, LevelError> {
        let config = Self {
            name: String::new(),
            width,
            height,
            max_moves,
            kinds: dedup_kinds(kinds.iter().copied()),
            obstacles: Vec::new(),
            targets: Targets::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the obstacle set. Duplicates are dropped; bounds are checked.
    pub fn with_obstacles(mut self, obstacles: &[Pos]) -> Result<Self, LevelError> {
        let set: BTreeSet<Pos> = obstacles.iter().copied().collect();
        self.obstacles = set.into_iter().collect();
        self.validate()?;
        Ok(self)
    }

    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    /// Parse and validate a level document.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let raw: RawLevel = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawLevel) -> Result<Self, LevelError> {
        let max = MAX_GRID_DIM as u32;
        let dims_ok = |d: u32| (MIN_MATCH as u32..=max).contains(&d);
        if !dims_ok(raw.grid_width) || !dims_ok(raw.grid_height) {
            return Err(LevelError::InvalidDimensions {
                width: raw.grid_width,
                height: raw.grid_height,
            });
        }
        let width = raw.grid_width as u8;
        let height = raw.grid_height as u8;

        let mut kinds = Vec::with_capacity(raw.item_types.len());
        for name in &raw.item_types {
            let kind = ItemKind::from_str(name).ok_or_else(|| LevelError::UnknownKind(name.clone()))?;
            kinds.push(kind);
        }
        let kinds = dedup_kinds(kinds);

        let mut obstacles = BTreeSet::new();
        for p in &raw.obstacles {
            if p.row >= raw.grid_height || p.col >= raw.grid_width {
                return Err(LevelError::ObstacleOutOfBounds {
                    row: p.row,
                    col: p.col,
                });
            }
            obstacles.insert(Pos::new(p.row as u8, p.col as u8));
        }

        let mut targets = Targets {
            min_score: raw.targets.min_score,
            ..Targets::default()
        };
        for (name, count) in raw.targets.collect {
            if name.eq_ignore_ascii_case("figurine") {
                targets.figurines = Some(count);
                continue;
            }
            let tile = Tile::from_str(&name)
                .filter(|t| *t != Tile::Obstacle)
                .ok_or_else(|| LevelError::UnknownTarget(name.clone()))?;
            targets.collect.insert(tile, count);
        }
        for (name, count) in raw.targets.combos {
            let combo = ComboKind::from_str(&name).ok_or_else(|| LevelError::UnknownTarget(name.clone()))?;
            targets.combos.insert(combo, count);
        }

        let config = Self {
            name: raw.name.unwrap_or_default(),
            width,
            height,
            max_moves: raw.max_moves,
            kinds,
            obstacles: obstacles.into_iter().collect(),
            targets,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions, kind count and obstacle bounds.
    pub fn validate(&self) -> Result<(), LevelError> {
        let dims_ok = |d: u8| (MIN_MATCH as u8..=MAX_GRID_DIM).contains(&d);
        if !dims_ok(self.width) || !dims_ok(self.height) {
            return Err(LevelError::InvalidDimensions {
                width: self.width as u32,
                height: self.height as u32,
            });
        }
        if self.kinds.len() < 3 {
            return Err(LevelError::TooFewKinds(self.kinds.len()));
        }
        if let Some(p) = self
            .obstacles
            .iter()
            .find(|p| p.row >= self.height || p.col >= self.width)
        {
            return Err(LevelError::ObstacleOutOfBounds {
                row: p.row as u32,
                col: p.col as u32,
            });
        }
        Ok(())
    }
}

fn dedup_kinds(kinds: impl IntoIterator<Item = ItemKind>) -> Vec<ItemKind> {
    let mut out: Vec<ItemKind> = Vec::new();
    for kind in kinds {
        if !out.contains(&kind) {
            out.push(kind);
        }
    }
    out
}
