//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so it is unit-tested against framebuffer contents.

use crate::banner::{Banner, BannerKind};
use crate::core::{GameSnapshot, TargetKind, TargetProgress};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{FigurineKind, ItemKind, Pos, Tile};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub cursor: Option<Pos>,
    pub selected: Option<Pos>,
    pub banner: Option<Banner>,
    /// Hint highlight phase; the runner toggles it to make the hint pulse.
    pub pulse: bool,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 110);
const SELECTED_BG: Rgb = Rgb::new(150, 110, 40);
const HINT_BG: Rgb = Rgb::new(40, 110, 60);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const PANEL_MIN_W: u16 = 14;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the board.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        state: &ViewState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let board_w = snap.width as u16 * self.cell_w;
        let board_h = snap.height as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let panel_w = if viewport.width >= frame_w + 2 + PANEL_MIN_W {
            PANEL_MIN_W + 2
        } else {
            0
        };

        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', Style::new(BOARD_BG, BOARD_BG));
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        for row in 0..snap.height {
            for col in 0..snap.width {
                let pos = Pos::new(row, col);
                let bg = cell_background(snap, state, pos);
                let (ch, fg, bold) = match snap.cell(pos) {
                    Some(Tile::Item(kind)) => (kind_glyph(kind), kind_color(kind), true),
                    Some(Tile::Figurine(kind)) => ('◆', figurine_color(kind), true),
                    Some(Tile::Obstacle) => ('█', Rgb::new(110, 110, 120), false),
                    None => ('·', Rgb::new(70, 70, 80), false),
                };
                let x = start_x + 1 + col as u16 * self.cell_w;
                let y = start_y + 1 + row as u16;
                let mut style = Style::new(fg, bg);
                style.bold = bold;
                if snap.cell(pos) == Some(Tile::Obstacle) {
                    fb.fill_rect(x, y, self.cell_w, 1, ch, style);
                } else {
                    fb.fill_rect(x, y, self.cell_w, 1, ' ', style);
                    fb.put_char(x, y, ch, style);
                }
            }
        }

        if panel_w > 0 {
            self.draw_side_panel(fb, snap, state, start_x + frame_w + 2, start_y);
        }

        if snap.game_over() {
            let won = snap.progress.met;
            let text = if won { "YOU WIN" } else { "GAME OVER" };
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        } else if snap.stuck {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "NO MOVES");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, state: &ViewState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, state, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        state: &ViewState,
        x: u16,
        start_y: u16,
    ) {
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let done = Style::new(Rgb::new(120, 220, 120), PANEL_BG);

        let mut y = start_y;
        if !snap.level_name.is_empty() {
            fb.put_str(x, y, &snap.level_name, label);
            y += 2;
        }

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.stats.score, value);
        y += 3;

        fb.put_str(x, y, "MOVES", label);
        fb.put_u32(x, y + 1, snap.stats.moves_remaining, value);
        y += 3;

        if !snap.progress.entries.is_empty() {
            fb.put_str(x, y, "TARGETS", label);
            y += 1;
            for entry in &snap.progress.entries {
                let style = if entry.done() { done } else { value };
                let end = fb.put_str(x, y, &target_label(entry), style);
                let end = fb.put_u32(end + 1, y, entry.current.min(entry.required), style);
                let end = fb.put_str(end, y, "/", style);
                fb.put_u32(end, y, entry.required, style);
                y += 1;
            }
            y += 1;
        }

        if let Some(banner) = state.banner {
            fb.put_str(x, y, &banner.kind.text(), banner_style(banner.kind));
        }
    }
}

fn cell_background(snap: &GameSnapshot, state: &ViewState, pos: Pos) -> Rgb {
    if state.selected == Some(pos) {
        SELECTED_BG
    } else if state.cursor == Some(pos) {
        CURSOR_BG
    } else if state.pulse && snap.is_hinted(pos) {
        HINT_BG
    } else {
        BOARD_BG
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = Style::default();
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str_centered(x, y.saturating_add(h / 2), w, text, style);
}

fn target_label(entry: &TargetProgress) -> String {
    match entry.kind {
        TargetKind::Collect(tile) => tile.as_str().to_string(),
        TargetKind::Figurines => "figurine".to_string(),
        TargetKind::Score => "score".to_string(),
        TargetKind::Combo(combo) => combo.as_str().to_string(),
    }
}

fn banner_style(kind: BannerKind) -> Style {
    let fg = match kind {
        BannerKind::Crispy => Rgb::new(255, 200, 80),
        BannerKind::Hot => Rgb::new(255, 90, 60),
        BannerKind::Double | BannerKind::Combo(_) => Rgb::new(120, 200, 255),
        BannerKind::Reshuffle => Rgb::new(200, 200, 200),
        BannerKind::Figurine(kind) => figurine_color(kind),
        BannerKind::GameOver { .. } => Rgb::new(255, 255, 255),
    };
    Style::new(fg, PANEL_BG).bold()
}

pub fn kind_glyph(kind: ItemKind) -> char {
    match kind {
        ItemKind::Chicken => '●',
        ItemKind::Burger => '■',
        ItemKind::Fries => '▲',
        ItemKind::Cola => '▼',
        ItemKind::Bucket => '▣',
        ItemKind::Cookie => '○',
        ItemKind::Drumstick => '♠',
        ItemKind::Wing => '♣',
        ItemKind::IceCream => '♥',
        ItemKind::Donut => '◎',
        ItemKind::Cappuccino => '¤',
    }
}

pub fn figurine_color(kind: FigurineKind) -> Rgb {
    match kind {
        FigurineKind::Belka => Rgb::new(212, 165, 116),
        FigurineKind::Strelka => Rgb::new(192, 192, 192),
        FigurineKind::Sputnik => Rgb::new(135, 206, 235),
        FigurineKind::Vostok => Rgb::new(255, 99, 71),
        FigurineKind::Spaceship => Rgb::new(65, 105, 225),
    }
}

pub fn kind_color(kind: ItemKind) -> Rgb {
    match kind {
        ItemKind::Chicken => Rgb::new(240, 170, 60),
        ItemKind::Burger => Rgb::new(200, 110, 50),
        ItemKind::Fries => Rgb::new(250, 220, 80),
        ItemKind::Cola => Rgb::new(220, 60, 60),
        ItemKind::Bucket => Rgb::new(230, 230, 230),
        ItemKind::Cookie => Rgb::new(190, 140, 90),
        ItemKind::Drumstick => Rgb::new(210, 120, 40),
        ItemKind::Wing => Rgb::new(255, 150, 90),
        ItemKind::IceCream => Rgb::new(250, 160, 200),
        ItemKind::Donut => Rgb::new(200, 100, 220),
        ItemKind::Cappuccino => Rgb::new(160, 110, 70),
    }
}
