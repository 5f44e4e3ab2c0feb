//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into cursor actions and turns a two-step cell selection into a
//! [`PlayerIntent`](crate::types::PlayerIntent) the engine understands.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::{Cursor, Direction};
pub use map::{handle_key_event, should_quit, CursorAction};
