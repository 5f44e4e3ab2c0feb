//! Scoring and objectives
//!
//! # Points
//!
//! Each run of length `L` resolved at combo depth `C` is worth
//! `BASE_MATCH_POINTS * L * C`; every figurine swept into the same pass adds
//! `FIGURINE_BONUS`. Cells removed only by a line clear or a clear-all add no
//! points of their own (they still count as collected). A double match is a
//! cue, not a bonus.
//!
//! # Objectives
//!
//! A level may require collected counts per tile (figurines per kind, or any
//! figurine via `"figurine"`), a minimum score, and a number of special matches (`"4_match"`, `"5_match"`, `"double"`). Every listed
//! target must be met to win. Stars: 3 at `2 x min_score`, 2 at
//! `1.5 x min_score`, otherwise 1; 0 when the level is lost.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::effects::Resolution;
use crate::matcher::MatchGroup;
use crate::types::{Tile, BASE_MATCH_POINTS, FIGURINE_BONUS};

/// Points for one run.
pub fn match_points(len: u8, combo: u32) -> u32 {
    BASE_MATCH_POINTS * len as u32 * combo
}

/// Points for one detection pass.
pub fn pass_points(groups: &[MatchGroup], figurines: usize, combo: u32) -> u32 {
    let runs: u32 = groups.iter().map(|g| match_points(g.len, combo)).sum();
    runs + FIGURINE_BONUS * figurines as u32
}

/// Special-match categories tracked for combo objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComboKind {
    FourMatch,
    FiveMatch,
    Double,
}

impl ComboKind {
    pub const ALL: [ComboKind; 3] = [ComboKind::FourMatch, ComboKind::FiveMatch, ComboKind::Double];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "4_match" => Some(ComboKind::FourMatch),
            "5_match" => Some(ComboKind::FiveMatch),
            "double" => Some(ComboKind::Double),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComboKind::FourMatch => "4_match",
            ComboKind::FiveMatch => "5_match",
            ComboKind::Double => "double",
        }
    }
}

/// Running totals of special matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboCounts {
    pub four_match: u32,
    pub five_match: u32,
    pub double: u32,
}

impl ComboCounts {
    pub fn get(&self, kind: ComboKind) -> u32 {
        match kind {
            ComboKind::FourMatch => self.four_match,
            ComboKind::FiveMatch => self.five_match,
            ComboKind::Double => self.double,
        }
    }

    pub fn record(&mut self, resolution: &Resolution) {
        self.four_match += resolution.four_matches;
        self.five_match += resolution.five_matches;
        if resolution.double_match {
            self.double += 1;
        }
    }
}

/// Session statistics reported to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub score: u32,
    pub moves_remaining: u32,
    /// Per tile, so figurines are counted per kind.
    pub collected: BTreeMap<Tile, u32>,
    /// Figurines collected, all kinds together.
    pub figurines: u32,
    pub combos: ComboCounts,
}

impl Stats {
    pub fn new(moves: u32) -> Self {
        Self {
            moves_remaining: moves,
            ..Self::default()
        }
    }

    pub fn collected_of(&self, tile: Tile) -> u32 {
        self.collected.get(&tile).copied().unwrap_or(0)
    }

    pub fn collect(&mut self, tile: Tile) {
        *self.collected.entry(tile).or_insert(0) += 1;
        if tile.is_figurine() {
            self.figurines += 1;
        }
    }
}

/// Level targets, validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub collect: BTreeMap<Tile, u32>,
    /// Figurines of any kind.
    pub figurines: Option<u32>,
    pub min_score: Option<u32>,
    pub combos: BTreeMap<ComboKind, u32>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.collect.is_empty()
            && self.figurines.is_none()
            && self.min_score.is_none()
            && self.combos.is_empty()
    }
}

/// What a single target measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Collect(Tile),
    Figurines,
    Score,
    Combo(ComboKind),
}

/// Progress toward one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProgress {
    pub kind: TargetKind,
    pub current: u32,
    pub required: u32,
}

impl TargetProgress {
    pub fn done(&self) -> bool {
        self.current >= self.required
    }
}

/// Progress toward every target of a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveProgress {
    pub entries: Vec<TargetProgress>,
    pub met: bool,
}

/// Evaluates [`Targets`] against session [`Stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Objectives {
    targets: Targets,
}

impl Objectives {
    pub fn new(targets: Targets) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Progress for collect targets, then score, then combos.
    pub fn evaluate(&self, stats: &Stats) -> ObjectiveProgress {
        let mut entries = Vec::new();
        for (&tile, &required) in &self.targets.collect {
            entries.push(TargetProgress {
                kind: TargetKind::Collect(tile),
                current: stats.collected_of(tile),
                required,
            });
        }
        if let Some(required) = self.targets.figurines {
            entries.push(TargetProgress {
                kind: TargetKind::Figurines,
                current: stats.figurines,
                required,
            });
        }
        if let Some(min) = self.targets.min_score {
            entries.push(TargetProgress {
                kind: TargetKind::Score,
                current: stats.score,
                required: min,
            });
        }
        for (&combo, &required) in &self.targets.combos {
            entries.push(TargetProgress {
                kind: TargetKind::Combo(combo),
                current: stats.combos.get(combo),
                required,
            });
        }
        let met = entries.iter().all(|e| e.done());
        ObjectiveProgress { entries, met }
    }

    /// Star rating for a finished session.
    pub fn stars(&self, score: u32, won: bool) -> u8 {
        if !won {
            return 0;
        }
        let min = self.targets.min_score.unwrap_or(0) as u64;
        let score = score as u64;
        if score >= min * 2 {
            3
        } else if score * 2 >= min * 3 {
            2
        } else {
            1
        }
    }
}

/// Summary handed to observers when the move budget runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverReport {
    pub stats: Stats,
    pub won: bool,
    pub stars: u8,
}

/// Session result in the shape the backend expects for `targets_met`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub score: u32,
    pub collect: BTreeMap<String, u32>,
    pub combos: BTreeMap<String, u32>,
}

impl From<&Stats> for SessionResult {
    fn from(stats: &Stats) -> Self {
        let mut collect: BTreeMap<String, u32> = stats
            .collected
            .iter()
            .map(|(tile, count)| (tile.as_str().to_string(), *count))
            .collect();
        if stats.figurines > 0 {
            collect.insert("figurine".to_string(), stats.figurines);
        }
        let combos = ComboKind::ALL
            .iter()
            .map(|kind| (kind.as_str().to_string(), stats.combos.get(*kind)))
            .filter(|(_, count)| *count > 0)
            .collect();
        Self {
            score: stats.score,
            collect,
            combos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FigurineKind, ItemKind, Orientation, Pos};

    fn group(len: u8) -> MatchGroup {
        MatchGroup {
            kind: ItemKind::Chicken,
            orientation: Orientation::Horizontal,
            anchor: Pos::new(0, 0),
            len,
        }
    }

    #[test]
    fn test_match_points_formula() {
        assert_eq!(match_points(3, 1), 30);
        assert_eq!(match_points(4, 2), 80);
        assert_eq!(match_points(5, 3), 150);
    }

    #[test]
    fn test_pass_points_sum_groups_and_figurines() {
        assert_eq!(pass_points(&[group(3), group(3)], 0, 1), 60);
        assert_eq!(pass_points(&[group(3)], 1, 2), 60 + 50);
    }

    #[test]
    fn test_evaluate_requires_every_target() {
        let mut targets = Targets::default();
        targets.collect.insert(Tile::Item(ItemKind::Drumstick), 2);
        targets.min_score = Some(100);
        targets.combos.insert(ComboKind::FourMatch, 1);
        let objectives = Objectives::new(targets);

        let mut stats = Stats::new(10);
        stats.score = 150;
        stats.collect(Tile::Item(ItemKind::Drumstick));
        stats.collect(Tile::Item(ItemKind::Drumstick));
        let progress = objectives.evaluate(&stats);
        assert_eq!(progress.entries.len(), 3);
        assert!(!progress.met);

        stats.combos.four_match = 1;
        assert!(objectives.evaluate(&stats).met);
    }

    #[test]
    fn test_figurines_count_per_kind_and_in_total() {
        let mut stats = Stats::new(10);
        stats.collect(Tile::Figurine(FigurineKind::Sputnik));
        stats.collect(Tile::Figurine(FigurineKind::Sputnik));
        stats.collect(Tile::Figurine(FigurineKind::Belka));
        stats.collect(Tile::Item(ItemKind::Cola));
        assert_eq!(stats.collected_of(Tile::Figurine(FigurineKind::Sputnik)), 2);
        assert_eq!(stats.collected_of(Tile::Figurine(FigurineKind::Belka)), 1);
        assert_eq!(stats.collected_of(Tile::Figurine(FigurineKind::Vostok)), 0);
        assert_eq!(stats.figurines, 3);

        let mut targets = Targets {
            figurines: Some(3),
            ..Targets::default()
        };
        targets.collect.insert(Tile::Figurine(FigurineKind::Sputnik), 2);
        let progress = Objectives::new(targets).evaluate(&stats);
        assert_eq!(progress.entries.len(), 2);
        assert!(progress.met);
    }

    #[test]
    fn test_empty_targets_are_met() {
        let objectives = Objectives::default();
        assert!(objectives.evaluate(&Stats::new(5)).met);
        assert_eq!(objectives.stars(0, true), 3);
    }

    #[test]
    fn test_star_thresholds() {
        let objectives = Objectives::new(Targets {
            min_score: Some(1000),
            ..Targets::default()
        });
        assert_eq!(objectives.stars(2000, true), 3);
        assert_eq!(objectives.stars(1500, true), 2);
        assert_eq!(objectives.stars(1499, true), 1);
        assert_eq!(objectives.stars(5000, false), 0);
    }

    #[test]
    fn test_session_result_uses_backend_names() {
        let mut stats = Stats::new(0);
        stats.score = 420;
        stats.collect(Tile::Item(ItemKind::IceCream));
        stats.collect(Tile::Figurine(FigurineKind::Strelka));
        stats.combos.double = 2;
        let json = serde_json::to_value(SessionResult::from(&stats)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 420,
                "collect": {"ice_cream": 1, "strelka": 1, "figurine": 1},
                "combos": {"double": 2}
            })
        );
    }
}
