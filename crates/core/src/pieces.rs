//! Pieces module - tetromino shapes, movement and SRS rotation
//!
//! Shapes come from a fixed table indexed by (kind, rotation); nothing is
//! rotated geometrically at runtime. Offsets are relative to the top-left of
//! the piece's SRS bounding box (4x4 for I, 3x3 for J/L/S/T/Z, O sits in
//! columns 1-2 of a 4-wide box), with y growing downward like the grid.
//!
//! Rotation uses the Super Rotation System kick tables.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::grid::Grid;
use crate::types::{MoveError, PieceKind, RotateDir, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Shape table: `SHAPES[kind][rotation]`, kinds in `PieceKind::ALL` order,
/// rotations North, East, South, West.
#[rustfmt::skip]
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation.index()]
}

/// Absolute cells of `kind` at `rotation` with its anchor at (x, y).
pub fn cells(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> PieceShape {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}

/// SRS wall kick tests, `[from_rotation][dir]` with dir 0 = clockwise,
/// 1 = counter-clockwise. Five (dx, dy) tests each, tried in order.
///
/// Values are written as in the SRS reference, where +y points up; they are
/// flipped when applied because grid y points down.
pub type KickTable = [[[(i8, i8); 5]; 2]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
#[rustfmt::skip]
const JLSTZ_KICKS: KickTable = [
    // from North: N->E, N->W
    [[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]],
    // from East: E->S, E->N
    [[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)], [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]],
    // from South: S->W, S->E
    [[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)], [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]],
    // from West: W->N, W->S
    [[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]],
];

/// I kick table
#[rustfmt::skip]
const I_KICKS: KickTable = [
    // from North: N->E, N->W
    [[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)], [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]],
    // from East: E->S, E->N
    [[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)], [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]],
    // from South: S->W, S->E
    [[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)], [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]],
    // from West: W->N, W->S
    [[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)], [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]],
];

/// O never kicks: its shape is the same in every orientation.
const O_KICKS: KickTable = [[[(0, 0); 5]; 2]; 4];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Kick tests for rotating `kind` out of `from` in `dir`, in grid (y-down) space.
pub fn kicks(kind: PieceKind, from: Rotation, dir: RotateDir) -> [(i8, i8); 5] {
    let d = match dir {
        RotateDir::Cw => 0,
        RotateDir::Ccw => 1,
    };
    get_kick_table(kind)[from.index()][d].map(|(dx, dy)| (dx, -dy))
}

/// A positioned tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// A piece at the spawn anchor, facing North
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Rotation::North, SPAWN_X, SPAWN_Y)
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid cells
    pub fn cells(&self) -> PieceShape {
        cells(self.kind, self.rotation, self.x, self.y)
    }

    /// All cells in bounds and unoccupied
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.fits(&self.cells())
    }

    /// The piece moved by (dx, dy), or `Blocked`.
    pub fn shifted(&self, dx: i8, dy: i8, grid: &Grid) -> Result<Piece, MoveError> {
        let moved = Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        };
        if moved.fits(grid) {
            Ok(moved)
        } else {
            Err(MoveError::Blocked)
        }
    }

    /// The piece rotated in `dir`, nudged by the first SRS kick that fits.
    pub fn rotated(&self, dir: RotateDir, grid: &Grid) -> Result<Piece, MoveError> {
        let rotation = self.rotation.rotate(dir);
        kicks(self.kind, self.rotation, dir)
            .into_iter()
            .map(|(dx, dy)| Piece {
                rotation,
                x: self.x + dx,
                y: self.y + dy,
                ..*self
            })
            .find(|candidate| candidate.fits(grid))
            .ok_or(MoveError::Blocked)
    }

    /// Resting on the floor or the stack
    pub fn is_grounded(&self, grid: &Grid) -> bool {
        self.shifted(0, 1, grid).is_err()
    }

    /// How many rows the piece can fall before it rests
    pub fn drop_distance(&self, grid: &Grid) -> u8 {
        let mut distance = 0u8;
        let mut probe = *self;
        while let Ok(next) = probe.shifted(0, 1, grid) {
            probe = next;
            distance += 1;
        }
        distance
    }

    /// The piece at its landing row
    pub fn dropped(&self, grid: &Grid) -> Piece {
        Piece {
            y: self.y + self.drop_distance(grid) as i8,
            ..*self
        }
    }
}
