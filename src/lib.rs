//! blockfall (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under one roof and holds
//! the pieces the binary needs around them: environment configuration, the
//! high score file and the JSON-lines event log.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;
pub mod high_score;

pub use config::Config;
pub use event_log::{EventLog, LogEvent, LogRecord};
pub use high_score::HighScoreStore;
