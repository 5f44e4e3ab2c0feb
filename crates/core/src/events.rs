//! Engine output events
//!
//! The engine queues events while it works; the host drains them after each
//! call ([`GameState::drain_events`](crate::GameState::drain_events)) or hands
//! an observer to [`GameState::dispatch`](crate::GameState::dispatch).

use crate::scoring::{GameOverReport, Stats};
use crate::types::{EffectCue, FigurineKind, Pos, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Score, moves or collection changed. Sent at least once per settled turn.
    StatsUpdated(Stats),
    /// The move budget is spent and the last turn has settled.
    GameOver(GameOverReport),
    /// A figurine of this kind was placed on the board for the first time this session.
    FigurineAppeared(FigurineKind),
    /// One removed tile (ordinary or figurine).
    TileCollected(Tile),
    Effect(EffectCue),
    /// A cascade pass at depth 2 or more resolved.
    Combo(u32),
    CleanupStarted,
    CleanupFinished,
    HintShown(Pos, Pos),
    HintCleared,
}

/// Callback-style consumer of [`GameEvent`]s. Every method defaults to a no-op.
pub trait GameObserver {
    fn on_stats_update(&mut self, _stats: &Stats) {}
    fn on_game_over(&mut self, _report: &GameOverReport) {}
    fn on_figurine_appeared(&mut self, _kind: FigurineKind) {}
    fn on_tile_collected(&mut self, _tile: Tile) {}
    fn on_effect(&mut self, _cue: EffectCue) {}
    fn on_combo(&mut self, _depth: u32) {}
    fn on_cleanup_started(&mut self) {}
    fn on_cleanup_finished(&mut self) {}
    fn on_hint(&mut self, _hint: Option<(Pos, Pos)>) {}
}

impl GameEvent {
    /// Route this event to the matching observer method.
    pub fn dispatch_to(&self, observer: &mut dyn GameObserver) {
        match self {
            GameEvent::StatsUpdated(stats) => observer.on_stats_update(stats),
            GameEvent::GameOver(report) => observer.on_game_over(report),
            GameEvent::FigurineAppeared(kind) => observer.on_figurine_appeared(*kind),
            GameEvent::TileCollected(tile) => observer.on_tile_collected(*tile),
            GameEvent::Effect(cue) => observer.on_effect(*cue),
            GameEvent::Combo(depth) => observer.on_combo(*depth),
            GameEvent::CleanupStarted => observer.on_cleanup_started(),
            GameEvent::CleanupFinished => observer.on_cleanup_finished(),
            GameEvent::HintShown(a, b) => observer.on_hint(Some((*a, *b))),
            GameEvent::HintCleared => observer.on_hint(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    #[derive(Default)]
    struct Recorder {
        collected: Vec<Tile>,
        hints: Vec<Option<(Pos, Pos)>>,
        combos: Vec<u32>,
        figurines: Vec<FigurineKind>,
    }

    impl GameObserver for Recorder {
        fn on_tile_collected(&mut self, tile: Tile) {
            self.collected.push(tile);
        }
        fn on_hint(&mut self, hint: Option<(Pos, Pos)>) {
            self.hints.push(hint);
        }
        fn on_combo(&mut self, depth: u32) {
            self.combos.push(depth);
        }
        fn on_figurine_appeared(&mut self, kind: FigurineKind) {
            self.figurines.push(kind);
        }
    }

    #[test]
    fn test_dispatch_routes_to_observer() {
        let mut rec = Recorder::default();
        let a = Pos::new(0, 0);
        let b = Pos::new(0, 1);
        for event in [
            GameEvent::TileCollected(Tile::Item(ItemKind::Wing)),
            GameEvent::HintShown(a, b),
            GameEvent::HintCleared,
            GameEvent::Combo(3),
            GameEvent::CleanupStarted,
            GameEvent::FigurineAppeared(FigurineKind::Sputnik),
            GameEvent::TileCollected(Tile::Figurine(FigurineKind::Sputnik)),
        ] {
            event.dispatch_to(&mut rec);
        }
        assert_eq!(
            rec.collected,
            vec![
                Tile::Item(ItemKind::Wing),
                Tile::Figurine(FigurineKind::Sputnik)
            ]
        );
        assert_eq!(rec.figurines, vec![FigurineKind::Sputnik]);
        assert_eq!(rec.hints, vec![Some((a, b)), None]);
        assert_eq!(rec.combos, vec![3]);
    }
}
