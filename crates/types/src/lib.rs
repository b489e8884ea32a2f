//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout blockfall.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal front end and the persistence helpers alike.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (3, 0), facing North
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the terminal loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `DEFAULT_DAS_MS` | 150 | Delay before horizontal auto-repeat |
//! | `DEFAULT_ARR_MS` | 50 | Interval between auto-repeats |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{InputIntent, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(InputIntent::from_str("hardDrop"), Some(InputIntent::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = 0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop intervals by level (milliseconds per row), index = level
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Gravity floor once the level runs past the table
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeat interval in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Line clear scoring table (classic Nintendo scoring)
///
/// Base points for clearing N rows at level 0; multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// The kind doubles as the color tag of locked cells:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (the unshuffled bag).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the preview panel and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Compact cell code used by snapshots: 1..=7, 0 is reserved for empty.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 270° clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, dir: RotateDir) -> Self {
        match dir {
            RotateDir::Cw => self.rotate_cw(),
            RotateDir::Ccw => self.rotate_ccw(),
        }
    }

    /// Rotation index 0-3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Cw,
    Ccw,
}

impl RotateDir {
    pub fn inverse(&self) -> Self {
        match self {
            RotateDir::Cw => RotateDir::Ccw,
            RotateDir::Ccw => RotateDir::Cw,
        }
    }
}

/// Player intents accepted by the engine.
///
/// This is a closed set: the front end maps its own keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputIntent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its lowest legal row and lock it
    HardDrop,
    /// Swap the active piece with the hold slot
    Hold,
}

impl InputIntent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::InputIntent;
    ///
    /// assert_eq!(InputIntent::from_str("moveLeft"), Some(InputIntent::MoveLeft));
    /// assert_eq!(InputIntent::from_str("ROTATECW"), Some(InputIntent::RotateCw));
    /// assert_eq!(InputIntent::from_str("pause"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputIntent::MoveLeft),
            "moveright" => Some(InputIntent::MoveRight),
            "rotatecw" => Some(InputIntent::RotateCw),
            "rotateccw" => Some(InputIntent::RotateCcw),
            "softdrop" => Some(InputIntent::SoftDrop),
            "harddrop" => Some(InputIntent::HardDrop),
            "hold" => Some(InputIntent::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputIntent::MoveLeft => "moveLeft",
            InputIntent::MoveRight => "moveRight",
            InputIntent::RotateCw => "rotateCw",
            InputIntent::RotateCcw => "rotateCcw",
            InputIntent::SoftDrop => "softDrop",
            InputIntent::HardDrop => "hardDrop",
            InputIntent::Hold => "hold",
        }
    }
}

/// Game phase.
///
/// `Spawning -> Falling -> Locking -> LineClear -> Spawning`, with
/// `GameOver` as the only terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    LineClear,
    GameOver,
}

impl Phase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

/// Randomizer policy for the piece bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    /// Shuffle all seven kinds, deal them out, reshuffle.
    #[default]
    SevenBag,
    /// Every draw independent and uniform.
    Uniform,
}

impl RandomizerKind {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bag" | "7bag" | "7-bag" | "seven_bag" => Some(RandomizerKind::SevenBag),
            "uniform" | "random" => Some(RandomizerKind::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizerKind::SevenBag => "bag",
            RandomizerKind::Uniform => "uniform",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Grid coordinate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Caller passed coordinates outside the board. Programmer error.
    OutOfBounds { x: i8, y: i8 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => write!(
                f,
                "cell ({x}, {y}) is outside the {BOARD_WIDTH}x{BOARD_HEIGHT} board"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Piece movement errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The target cells overlap the board or leave its bounds.
    Blocked,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Blocked => write!(f, "piece is blocked"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Engine event, queued for observers (event log, sound, UI flashes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece merged into the board.
    Locked {
        kind: PieceKind,
        lines_cleared: u32,
        score_delta: u32,
        level: u32,
        leveled_up: bool,
    },
    /// Block out; the game is over.
    GameOver { score: u32, lines: u32, level: u32 },
}
