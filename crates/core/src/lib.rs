//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to run a game of blockfall without a screen, a clock or a
//! keyboard. The caller supplies elapsed time and player intents; the engine
//! owns all state and never blocks or touches I/O.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with collision queries and row clearing
//! - [`pieces`]: tetromino shape table, movement and SRS rotation
//! - [`bag`]: seeded 7-bag (or uniform) piece generation
//! - [`scoring`]: classic line scores, levels and gravity intervals
//! - [`game_state`]: the phase machine tying it all together
//! - [`snapshot`]: plain-data copy of a game for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer** by default; a uniform randomizer is available
//! - **SRS Rotation** with wall kicks; O rotates in place
//! - **Locking**: a piece locks when gravity cannot move it, or on hard drop
//! - **Hold**: once per spawned piece
//! - **Scoring**: 40 / 100 / 300 / 1200 x (level + 1), level up every 10 lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{InputIntent, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! game.apply_input(InputIntent::MoveRight);
//! game.apply_input(InputIntent::RotateCw);
//! game.apply_input(InputIntent::HardDrop);
//!
//! // The next piece is already falling.
//! assert_eq!(game.pieces_spawned(), 2);
//! assert_eq!(game.grid().occupied_count(), 4);
//! ```

pub mod bag;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use bag::{Bag, SimpleRng};
pub use game_state::{Events, GameState, Rules};
pub use grid::{ClearedRows, Grid};
pub use pieces::{get_shape, Piece};
pub use scoring::{apply_clear, calculate_line_score, get_drop_interval_ms, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NEXT_PREVIEW};
