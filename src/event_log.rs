//! JSON-lines event log.
//!
//! One object per line: `{"type":..., "seq":..., "ts":..., "session":..., ...}`.
//! Enabled by `BLOCKFALL_LOG_PATH`. The first failed write turns the log off;
//! the game never stops because of it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Locked {
        piece: String,
        lines_cleared: u32,
        score_delta: u32,
        level: u32,
        leveled_up: bool,
    },
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
    Restart {
        episode: u32,
        seed: u32,
    },
    HighScore {
        score: u32,
        previous: u32,
    },
}

impl From<GameEvent> for LogEvent {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Locked {
                kind,
                lines_cleared,
                score_delta,
                level,
                leveled_up,
            } => LogEvent::Locked {
                piece: kind.as_str().to_string(),
                lines_cleared,
                score_delta,
                level,
                leveled_up,
            },
            GameEvent::GameOver {
                score,
                lines,
                level,
            } => LogEvent::GameOver {
                score,
                lines,
                level,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub seq: u64,
    /// Milliseconds since the Unix epoch
    pub ts: u64,
    pub session: u32,
    #[serde(flatten)]
    pub event: LogEvent,
}

pub struct EventLog {
    file: Option<File>,
    session: u32,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            file: None,
            session: 0,
            seq: 0,
            buf: Vec::new(),
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn open(path: &Path, session: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self {
            file: Some(file),
            session,
            seq: 0,
            buf: Vec::with_capacity(256),
        })
    }

    /// Open `path` if given; on failure report it and carry on without a log.
    pub fn open_or_disabled(path: Option<&Path>, session: u32) -> Self {
        let Some(path) = path else {
            return Self::disabled();
        };
        match Self::open(path, session) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("[blockfall] event log disabled: {e:#}");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn record(&mut self, event: impl Into<LogEvent>) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        self.seq += 1;
        let record = LogRecord {
            seq: self.seq,
            ts: now_ms(),
            session: self.session,
            event: event.into(),
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if file.write_all(&self.buf).is_err() {
            self.file = None;
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_record_shape() {
        let record = LogRecord {
            seq: 3,
            ts: 1_700_000_000_000,
            session: 9,
            event: GameEvent::Locked {
                kind: PieceKind::T,
                lines_cleared: 2,
                score_delta: 100,
                level: 0,
                leveled_up: false,
            }
            .into(),
        };

        let v: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(v["type"], "locked");
        assert_eq!(v["seq"], 3);
        assert_eq!(v["session"], 9);
        assert_eq!(v["piece"], "T");
        assert_eq!(v["lines_cleared"], 2);
    }

    #[test]
    fn test_disabled_log_ignores_records() {
        let mut log = EventLog::disabled();
        log.record(LogEvent::Restart { episode: 1, seed: 2 });
        assert!(!log.is_enabled());
        assert_eq!(log.seq, 0);
    }
}
