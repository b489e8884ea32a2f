//! Scoring module - line clear points, levels and gravity
//!
//! Classic Nintendo scoring: 40 / 100 / 300 / 1200 points for 1-4 rows,
//! multiplied by (level + 1). Levels are 0-based and go up every
//! `lines_per_level` rows. Everything here is a pure function.

use crate::types::{DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, LINE_SCORES};

/// Calculate line clear score
/// lines: number of rows cleared at once (1-4)
/// level: level in effect when the rows were cleared (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Drop bonus: soft drop +1 per row, hard drop +2 per row
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(2)
    } else {
        cells
    }
}

/// Level for a running line total
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1)
}

/// Gravity interval for a level (milliseconds per row)
///
/// Follows the `DROP_INTERVALS` table, then holds at the floor. Never zero and
/// never increases with level.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}

/// Outcome of one lock: points and the new level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub leveled_up: bool,
}

/// Apply a clear of `cleared` rows to the running totals.
///
/// Points use the level in effect before the clear; the level is then
/// recomputed from the new line total and never goes down.
pub fn apply_clear(
    cleared: usize,
    level: u32,
    total_lines: u32,
    lines_per_level: u32,
) -> ScoreResult {
    let points = calculate_line_score(cleared, level);
    let lines = total_lines.saturating_add(cleared as u32);
    let new_level = calculate_level(lines, lines_per_level).max(level);
    ScoreResult {
        points,
        lines,
        level: new_level,
        leveled_up: new_level > level,
    }
}
