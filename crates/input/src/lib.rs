//! Terminal input module.
//!
//! Maps `crossterm` key events onto engine intents and front-end commands,
//! and provides a DAS/ARR auto-repeat helper for terminals that do not report
//! key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_quit, KeyAction};
