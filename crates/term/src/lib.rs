//! Terminal front end for the match-3 engine.
//!
//! A small game-oriented rendering layer: the view draws a [`GameSnapshot`]
//! into a framebuffer, the renderer flushes only what changed, and the banner
//! board turns engine events into short-lived headlines.
//!
//! Nothing here mutates the engine. Everything is read from snapshots and
//! events.
//!
//! [`GameSnapshot`]: tui_match3_core::GameSnapshot

pub mod banner;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use banner::{Banner, BannerBoard, BannerKind, BANNER_MS};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, ViewState, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
