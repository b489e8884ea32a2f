//! Grid module - the playfield
//!
//! A 10x20 matrix where each cell is empty or holds the kind of the piece that
//! locked there. Stored as a flat row-major array: no allocation, good locality.
//! Coordinates: (x, y) with x in 0..10 (left to right) and y in 0..20 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, GridError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one [`Grid::clear_full_rows`] call, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Row-major cells (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite one cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) holds a locked cell.
    pub fn is_occupied(&self, x: i8, y: i8) -> Result<bool, GridError> {
        Self::index(x, y)
            .map(|idx| self.cells[idx].is_some())
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Collision query: in bounds and empty. Out of bounds counts as blocked.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Mark `cells` as occupied by `kind`.
    ///
    /// Every coordinate is checked before anything is written, so a failed call
    /// leaves the grid untouched. Overlap with existing cells is not checked here;
    /// the game state only places pieces it has already validated.
    pub fn place(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> Result<(), GridError> {
        if let Some(&(x, y)) = cells.iter().find(|&&(x, y)| Self::index(x, y).is_none()) {
            return Err(GridError::OutOfBounds { x, y });
        }

        for &(x, y) in cells {
            debug_assert!(self.is_free(x, y), "placing over occupied cell ({x}, {y})");
            self.set(x, y, Some(kind));
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// One row as a slice, `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Remove every full row and let the rows above fall into place.
    ///
    /// Two-cursor compaction from the bottom: non-full rows are copied down to
    /// the write cursor, full rows are skipped, and whatever is left above the
    /// cursor is blanked. Returns the removed row indices (as they were before
    /// the clear), bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Whether the spawn cells of a piece are free.
    pub fn fits(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Height of the stack: rows from the bottom up to the highest occupied cell.
    pub fn stack_height(&self) -> usize {
        (0..HEIGHT)
            .find(|&y| self.row(y).is_some_and(|row| row.iter().any(Option::is_some)))
            .map(|top| HEIGHT - top)
            .unwrap_or(0)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Encode as `PieceKind::code` values (0 = empty) for snapshots.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Build a grid from ASCII rows, top row first.
    ///
    /// `.` or space is empty, a piece letter is that kind, any other glyph is `I`.
    /// Missing rows at the top stay empty, so callers only spell out the stack.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            let y = offset + i;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                grid.cells[y * WIDTH + x] = cell;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
