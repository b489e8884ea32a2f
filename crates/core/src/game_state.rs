//! Game state module - the phase machine that runs a game
//!
//! Ties together the grid, pieces, bag and scoring. The game moves through
//! `Spawning -> Falling -> Locking -> LineClear -> Spawning` until a spawn is
//! blocked, which ends it in `GameOver`.
//!
//! The caller drives time with [`GameState::advance`] and player intents with
//! [`GameState::apply_input`]. Both run every transition they cause to
//! completion before returning, so between calls the phase is `Falling`,
//! `LineClear` (while a clear pause is pending) or `GameOver`.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::bag::Bag;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::scoring::{apply_clear, calculate_drop_score, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NEXT_PREVIEW};
use crate::types::*;

/// Events buffered between two `take_events` calls.
const MAX_EVENTS: usize = 8;

pub type Events = ArrayVec<GameEvent, MAX_EVENTS>;

/// Tunable rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Lines per level-up
    pub lines_per_level: u32,
    /// How long the game sits in `LineClear` after rows are removed
    pub line_clear_pause_ms: u32,
    /// Award soft drop (+1/row) and hard drop (+2/row) points
    pub drop_points: bool,
    pub randomizer: RandomizerKind,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lines_per_level: LINES_PER_LEVEL,
            line_clear_pause_ms: 0,
            drop_points: false,
            randomizer: RandomizerKind::SevenBag,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    bag: Bag,
    rules: Rules,
    phase: Phase,
    paused: bool,
    score: u32,
    level: u32,
    lines: u32,
    fall_timer: Duration,
    line_clear_timer: Duration,
    /// Incremented by every `restart`.
    episode: u32,
    pieces_spawned: u32,
    events: Events,
}

impl GameState {
    /// New 7-bag game with default rules. Nothing spawns until the first
    /// `start`, `advance` or `tick`.
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        Self::from_parts(Grid::new(), Bag::with_randomizer(seed, rules.randomizer), rules)
    }

    /// Build a game over an existing grid and bag (puzzles, tests).
    pub fn from_parts(grid: Grid, bag: Bag, rules: Rules) -> Self {
        Self {
            grid,
            active: None,
            hold: None,
            can_hold: true,
            bag,
            rules,
            phase: Phase::Spawning,
            paused: false,
            score: 0,
            level: 0,
            lines: 0,
            fall_timer: Duration::ZERO,
            line_clear_timer: Duration::ZERO,
            episode: 0,
            pieces_spawned: 0,
            events: Events::new(),
        }
    }

    /// Spawn the first piece
    pub fn start(&mut self) {
        self.settle();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Absolute cells of the falling piece
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// The kind that spawns next
    pub fn next_piece(&self) -> PieceKind {
        self.bag.peek()
    }

    pub fn next_queue(&self) -> [PieceKind; NEXT_PREVIEW] {
        self.bag.preview()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// Current gravity interval
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(self.fall_interval_ms() as u64)
    }

    pub fn fall_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Where the falling piece would land
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|p| p.dropped(&self.grid))
    }

    pub fn ghost_y(&self) -> Option<i8> {
        self.ghost().map(|p| p.y)
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    /// Advance game time.
    pub fn advance(&mut self, dt: Duration) {
        if self.paused {
            return;
        }

        match self.phase {
            Phase::GameOver => return,
            Phase::LineClear => {
                self.line_clear_timer = self.line_clear_timer.saturating_sub(dt);
            }
            Phase::Falling => self.apply_gravity(dt),
            Phase::Spawning | Phase::Locking => {}
        }

        self.settle();
    }

    /// [`GameState::advance`] in whole milliseconds
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.advance(Duration::from_millis(elapsed_ms as u64));
    }

    /// Apply a player intent. Returns whether it changed anything; illegal
    /// moves are simply ignored.
    pub fn apply_input(&mut self, intent: InputIntent) -> bool {
        if self.paused || self.phase != Phase::Falling {
            return false;
        }

        match intent {
            InputIntent::MoveLeft => self.try_shift(-1, 0),
            InputIntent::MoveRight => self.try_shift(1, 0),
            InputIntent::RotateCw => self.try_rotate(RotateDir::Cw),
            InputIntent::RotateCcw => self.try_rotate(RotateDir::Ccw),
            InputIntent::SoftDrop => {
                let moved = self.try_shift(0, 1);
                if moved && self.rules.drop_points {
                    self.add_score(calculate_drop_score(1, false));
                }
                moved
            }
            InputIntent::HardDrop => self.hard_drop(),
            InputIntent::Hold => self.hold(),
        }
    }

    /// Pause or resume. A finished game cannot be paused.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.is_game_over() {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Throw the current game away and start a fresh one with a new piece
    /// sequence. Rules are kept.
    pub fn restart(&mut self) {
        let mut bag = self.bag.clone();
        bag.reshuffle();
        let episode = self.episode.wrapping_add(1);
        *self = Self::from_parts(Grid::new(), bag, self.rules);
        self.episode = episode;
        self.start();
    }

    /// Run queued transitions until the machine rests.
    fn settle(&mut self) {
        loop {
            match self.phase {
                Phase::Spawning => self.spawn_piece(),
                Phase::Locking => self.lock_active(),
                Phase::LineClear => {
                    if !self.line_clear_timer.is_zero() {
                        return;
                    }
                    self.phase = Phase::Spawning;
                }
                Phase::Falling | Phase::GameOver => return,
            }
        }
    }

    fn spawn_piece(&mut self) {
        let piece = Piece::spawn(self.bag.next());
        if !piece.fits(&self.grid) {
            self.active = None;
            self.end_game();
            return;
        }

        self.active = Some(piece);
        self.can_hold = true;
        self.fall_timer = Duration::ZERO;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.phase = Phase::Falling;
    }

    fn apply_gravity(&mut self, dt: Duration) {
        let Some(mut active) = self.active else {
            self.phase = Phase::Spawning;
            return;
        };

        self.fall_timer = self.fall_timer.saturating_add(dt);
        let interval = self.fall_interval();
        while self.fall_timer >= interval {
            self.fall_timer -= interval;
            match active.shifted(0, 1, &self.grid) {
                Ok(moved) => {
                    active = moved;
                    self.active = Some(moved);
                }
                Err(MoveError::Blocked) => {
                    self.phase = Phase::Locking;
                    return;
                }
            }
        }
    }

    /// Merge the active piece into the grid, then resolve the line clear.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            self.phase = Phase::Spawning;
            return;
        };

        let placed = self.grid.place(&piece.cells(), piece.kind);
        debug_assert!(placed.is_ok(), "active piece left the grid: {placed:?}");
        self.phase = Phase::LineClear;

        let cleared = self.grid.clear_full_rows().len();
        let result = apply_clear(cleared, self.level, self.lines, self.rules.lines_per_level);
        self.add_score(result.points);
        self.lines = result.lines;
        self.level = result.level;

        if cleared > 0 {
            self.line_clear_timer = Duration::from_millis(self.rules.line_clear_pause_ms as u64);
        }

        self.push_event(GameEvent::Locked {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            score_delta: result.points,
            level: self.level,
            leveled_up: result.leveled_up,
        });
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.push_event(GameEvent::GameOver {
            score: self.score,
            lines: self.lines,
            level: self.level,
        });
    }

    fn push_event(&mut self, event: GameEvent) {
        // Undrained queues keep the most recent events.
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.shifted(dx, dy, &self.grid) {
            Ok(moved) => {
                self.active = Some(moved);
                true
            }
            Err(MoveError::Blocked) => false,
        }
    }

    fn try_rotate(&mut self, dir: RotateDir) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.rotated(dir, &self.grid) {
            Ok(rotated) => {
                self.active = Some(rotated);
                true
            }
            Err(MoveError::Blocked) => false,
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let distance = active.drop_distance(&self.grid);
        self.active = Some(active.dropped(&self.grid));
        if self.rules.drop_points {
            self.add_score(calculate_drop_score(distance as u32, true));
        }

        self.phase = Phase::Locking;
        self.settle();
        true
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                let piece = Piece::spawn(held);
                if piece.fits(&self.grid) {
                    self.active = Some(piece);
                    self.fall_timer = Duration::ZERO;
                } else {
                    self.active = None;
                    self.end_game();
                }
            }
            None => {
                self.active = None;
                self.phase = Phase::Spawning;
                self.settle();
            }
        }

        self.can_hold = false;
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next_queue = self.next_queue();
        out.phase = self.phase;
        out.paused = self.paused;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms();
        out.episode = self.episode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
