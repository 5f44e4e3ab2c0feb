//! Transient banners replayed from engine events.
//!
//! The engine reports what happened as events. The banner board keeps the most
//! recent headline and lets it fade after a fixed number of milliseconds, the
//! same way the engine's own timers accumulate elapsed time.

use crate::core::{GameObserver, GameOverReport};
use crate::types::{EffectCue, FigurineKind, Pos};

/// How long a banner stays visible.
pub const BANNER_MS: u32 = 1200;

/// Which headline to show. Also selects the banner colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Crispy,
    Hot,
    Double,
    Combo(u32),
    Reshuffle,
    Figurine(FigurineKind),
    GameOver { won: bool, stars: u8 },
}

impl BannerKind {
    pub fn text(&self) -> String {
        match self {
            BannerKind::Crispy => "CRISPY!".to_string(),
            BannerKind::Hot => "HOT!".to_string(),
            BannerKind::Double => "DOUBLE!".to_string(),
            BannerKind::Combo(depth) => format!("COMBO x{depth}"),
            BannerKind::Reshuffle => "RESHUFFLE".to_string(),
            BannerKind::Figurine(kind) => format!("{}!", kind.title()),
            BannerKind::GameOver { won: true, stars } => {
                format!("YOU WIN {}", "*".repeat(*stars as usize))
            }
            BannerKind::GameOver { won: false, .. } => "GAME OVER".to_string(),
        }
    }

    /// Game-over banners never expire.
    fn sticky(&self) -> bool {
        matches!(self, BannerKind::GameOver { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub remaining_ms: u32,
}

/// Event-driven banner state. Feed it through [`GameObserver`], then `tick` it.
#[derive(Debug, Clone, Default)]
pub struct BannerBoard {
    current: Option<Banner>,
    hint: Option<(Pos, Pos)>,
}

impl BannerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Banner> {
        self.current
    }

    /// Last hint seen through events.
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        self.hint
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        let Some(banner) = self.current.as_mut() else {
            return;
        };
        if banner.kind.sticky() {
            return;
        }
        banner.remaining_ms = banner.remaining_ms.saturating_sub(elapsed_ms);
        if banner.remaining_ms == 0 {
            self.current = None;
        }
    }

    /// Drop everything, e.g. after a reset.
    pub fn clear(&mut self) {
        self.current = None;
        self.hint = None;
    }

    fn show(&mut self, kind: BannerKind) {
        if matches!(self.current, Some(b) if b.kind.sticky()) {
            return;
        }
        self.current = Some(Banner {
            kind,
            remaining_ms: BANNER_MS,
        });
    }
}

impl GameObserver for BannerBoard {
    fn on_game_over(&mut self, report: &GameOverReport) {
        self.show(BannerKind::GameOver {
            won: report.won,
            stars: report.stars,
        });
    }

    fn on_figurine_appeared(&mut self, kind: FigurineKind) {
        self.show(BannerKind::Figurine(kind));
    }

    fn on_effect(&mut self, cue: EffectCue) {
        match cue {
            EffectCue::LineClear { .. } => self.show(BannerKind::Crispy),
            EffectCue::ClearAllOfType { .. } => self.show(BannerKind::Hot),
            EffectCue::DoubleMatch => self.show(BannerKind::Double),
        }
    }

    fn on_combo(&mut self, depth: u32) {
        self.show(BannerKind::Combo(depth));
    }

    fn on_cleanup_started(&mut self) {
        self.show(BannerKind::Reshuffle);
    }

    fn on_hint(&mut self, hint: Option<(Pos, Pos)>) {
        self.hint = hint;
    }
}
