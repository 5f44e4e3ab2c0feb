//! Terminal match-3 runner (default binary).
//!
//! Usage: `tui-match3 [--level FILE] [--seed N] [--hint-ms MS]`
//!
//! Keys: arrows/hjkl/wasd move, space/enter select, esc cancels the
//! selection, `r` restarts, `q` or Ctrl-C quits.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::core::{GameSnapshot, GameState, LevelConfig};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::term::{BannerBoard, FrameBuffer, GameView, TerminalRenderer, ViewState, Viewport};
use tui_match3::types::{PlayerIntent, TICK_MS};

/// Hint highlight toggles every this many milliseconds.
const PULSE_MS: u32 = 400;

struct Args {
    level: Option<String>,
    seed: Option<u32>,
    hint_ms: Option<u32>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        level: None,
        seed: None,
        hint_ms: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--level" => {
                args.level = Some(it.next().ok_or_else(|| anyhow!("--level needs a file"))?);
            }
            "--seed" => {
                let v = it.next().ok_or_else(|| anyhow!("--seed needs a number"))?;
                args.seed = Some(v.parse().map_err(|_| anyhow!("invalid --seed: {v}"))?);
            }
            "--hint-ms" => {
                let v = it.next().ok_or_else(|| anyhow!("--hint-ms needs a number"))?;
                args.hint_ms = Some(v.parse().map_err(|_| anyhow!("invalid --hint-ms: {v}"))?);
            }
            other => return Err(anyhow!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_level(path: Option<&str>) -> Result<LevelConfig> {
    let Some(path) = path else {
        return Ok(LevelConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    LevelConfig::from_json(&text).with_context(|| format!("loading level {path}"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let level = load_level(args.level.as_deref())?;
    let mut game = GameState::new(level, args.seed.unwrap_or_else(clock_seed));
    if let Some(ms) = args.hint_ms {
        game.set_hint_delay(ms);
    }

    // Leave raw mode before a panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = TerminalRenderer::new().exit();
        default_hook(info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::new();
    let mut cursor = Cursor::new(game.grid().width(), game.grid().height());
    let mut banners = BannerBoard::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut pulse_ms: u32 = 0;

    loop {
        game.dispatch(&mut banners);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        let state = ViewState {
            cursor: Some(cursor.pos()),
            selected: cursor.selected(),
            banner: banners.current(),
            pulse: (pulse_ms / PULSE_MS) % 2 == 0,
        };
        view.render_into(&snap, &state, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match cursor.apply(action) {
                            Some(PlayerIntent::Reset) => {
                                banners.clear();
                                game.apply_intent(PlayerIntent::Reset);
                            }
                            Some(intent) => {
                                game.apply_intent(intent);
                            }
                            None => game.interact(),
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
            banners.tick(TICK_MS);
            pulse_ms = pulse_ms.wrapping_add(TICK_MS);
        }
    }
}
