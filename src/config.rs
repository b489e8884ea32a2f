//! Runtime configuration from `BLOCKFALL_*` environment variables.
//!
//! Every variable is optional; anything missing or unparseable falls back to
//! its default.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::Rules;
use crate::types::{RandomizerKind, LINES_PER_LEVEL};

pub const DEFAULT_HIGH_SCORE_PATH: &str = ".blockfall_highscore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub randomizer: RandomizerKind,
    pub lines_per_level: u32,
    pub line_clear_pause_ms: u32,
    pub drop_points: bool,
    pub high_score_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            randomizer: RandomizerKind::SevenBag,
            lines_per_level: LINES_PER_LEVEL,
            line_clear_pause_ms: 0,
            drop_points: false,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            log_path: None,
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let randomizer = get("BLOCKFALL_RANDOMIZER")
            .and_then(|s| RandomizerKind::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let lines_per_level = get("BLOCKFALL_LINES_PER_LEVEL")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.lines_per_level);

        let line_clear_pause_ms = get("BLOCKFALL_LINE_CLEAR_PAUSE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.line_clear_pause_ms);

        let drop_points = get("BLOCKFALL_DROP_POINTS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.drop_points);

        let high_score_path = get("BLOCKFALL_HIGH_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.high_score_path);

        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        Self {
            seed,
            randomizer,
            lines_per_level,
            line_clear_pause_ms,
            drop_points,
            high_score_path,
            log_path,
        }
    }

    /// Engine rules for this configuration
    pub fn rules(&self) -> Rules {
        Rules {
            lines_per_level: self.lines_per_level,
            line_clear_pause_ms: self.line_clear_pause_ms,
            drop_points: self.drop_points,
            randomizer: self.randomizer,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let c = config(&[]);
        assert_eq!(c.randomizer, RandomizerKind::SevenBag);
        assert_eq!(c.lines_per_level, 10);
        assert_eq!(c.line_clear_pause_ms, 0);
        assert!(!c.drop_points);
        assert_eq!(c.high_score_path, PathBuf::from(DEFAULT_HIGH_SCORE_PATH));
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_values_are_parsed() {
        let c = config(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_RANDOMIZER", "uniform"),
            ("BLOCKFALL_LINES_PER_LEVEL", "5"),
            ("BLOCKFALL_LINE_CLEAR_PAUSE_MS", "250"),
            ("BLOCKFALL_DROP_POINTS", "TRUE"),
            ("BLOCKFALL_HIGH_SCORE_PATH", "/tmp/hs"),
            ("BLOCKFALL_LOG_PATH", " /tmp/events.jsonl "),
        ]);
        assert_eq!(c.seed, 42);
        assert_eq!(c.randomizer, RandomizerKind::Uniform);
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/events.jsonl")));

        let rules = c.rules();
        assert_eq!(rules.lines_per_level, 5);
        assert_eq!(rules.line_clear_pause_ms, 250);
        assert!(rules.drop_points);
        assert_eq!(rules.randomizer, RandomizerKind::Uniform);
    }

    #[test]
    fn test_garbage_falls_back() {
        let c = config(&[
            ("BLOCKFALL_RANDOMIZER", "tetris-master"),
            ("BLOCKFALL_LINES_PER_LEVEL", "0"),
            ("BLOCKFALL_LINE_CLEAR_PAUSE_MS", "-3"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]);
        assert_eq!(c.randomizer, RandomizerKind::SevenBag);
        assert_eq!(c.lines_per_level, 10);
        assert_eq!(c.line_clear_pause_ms, 0);
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = Config::from_env();
    }
}
