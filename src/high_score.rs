//! High score persistence: a single integer as one line of text.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored best score. A missing file reads as 0.
    pub fn load(&self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse()
            .with_context(|| format!("malformed high score in {}: {trimmed:?}", self.path.display()))
    }

    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, format!("{score}\n"))
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    /// Save `score` if it beats `best`. Returns the new best.
    pub fn submit(&self, score: u32, best: u32) -> Result<u32> {
        if score <= best {
            return Ok(best);
        }
        self.save(score)?;
        Ok(score)
    }
}
