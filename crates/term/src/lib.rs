//! Terminal rendering for blockfall.
//!
//! A small game-oriented layer: `GameView` paints a `GameSnapshot` into a
//! `FrameBuffer` of styled cells, and `TerminalRenderer` flushes that buffer
//! through crossterm, sending only what changed since the last frame.
//! No widget toolkit involved; board cells are drawn 2 columns wide so they
//! come out roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
