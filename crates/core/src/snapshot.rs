//! Plain-data view of a game for renderers and loggers.

use crate::pieces::Piece;
use crate::types::{Phase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Length of the upcoming-piece preview
pub const NEXT_PREVIEW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute cells, so renderers need no shape table
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

impl ActiveSnapshot {
    /// Cells moved down to the ghost row
    pub fn ghost_cells(&self, ghost_y: i8) -> [(i8, i8); 4] {
        let dy = ghost_y - self.y;
        self.cells.map(|(x, y)| (x, y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// `PieceKind::code` per cell, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; NEXT_PREVIEW],
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub episode: u32,
}

impl GameSnapshot {
    /// The piece shown in the NEXT panel
    pub fn next(&self) -> PieceKind {
        self.next_queue[0]
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_game_over()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next_queue: [PieceKind::I; NEXT_PREVIEW],
            phase: Phase::Spawning,
            paused: false,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval_ms: 0,
            episode: 0,
        }
    }
}
