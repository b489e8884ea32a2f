//! Bag module - upcoming piece generation
//!
//! The default policy is the "7-bag": each bag holds one of each kind
//! (I, O, T, S, Z, J, L), shuffled, dealt out until empty, then refilled.
//! A uniform randomizer and a scripted sequence are also available.
//!
//! Randomness comes from a small seeded LCG so games are reproducible.

use std::collections::VecDeque;

use crate::types::{PieceKind, RandomizerKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would still advance (c != 0), but keep seeds distinct from it.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32 with a=1664525, c=1013904223
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    SevenBag,
    Uniform,
    /// Cycles a fixed, non-empty list.
    Scripted { pieces: Vec<PieceKind>, cursor: usize },
}

/// Upcoming-piece queue
///
/// Holds at least one full bag of lookahead at all times, so `peek` and
/// `peek_n(7)` never need to touch the RNG.
#[derive(Debug, Clone)]
pub struct Bag {
    queue: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
    source: Source,
}

/// Number of kinds kept queued ahead of the current draw.
const LOOKAHEAD: usize = 7;

impl Bag {
    /// 7-bag with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_randomizer(seed, RandomizerKind::SevenBag)
    }

    pub fn with_randomizer(seed: u32, randomizer: RandomizerKind) -> Self {
        let source = match randomizer {
            RandomizerKind::SevenBag => Source::SevenBag,
            RandomizerKind::Uniform => Source::Uniform,
        };
        Self::from_source(seed, source)
    }

    /// Deal `pieces` in order, repeating forever. An empty list deals `I`.
    pub fn scripted(pieces: &[PieceKind]) -> Self {
        let pieces = if pieces.is_empty() {
            vec![PieceKind::I]
        } else {
            pieces.to_vec()
        };
        Self::from_source(0, Source::Scripted { pieces, cursor: 0 })
    }

    fn from_source(seed: u32, source: Source) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(LOOKAHEAD * 2),
            rng: SimpleRng::new(seed),
            seed,
            source,
        };
        bag.top_up();
        bag
    }

    /// Refill until a full bag of lookahead is queued.
    fn top_up(&mut self) {
        while self.queue.len() < LOOKAHEAD {
            match &mut self.source {
                Source::SevenBag => {
                    let mut fresh = PieceKind::ALL;
                    self.rng.shuffle(&mut fresh);
                    self.queue.extend(fresh);
                }
                Source::Uniform => {
                    let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                    self.queue.push_back(PieceKind::ALL[i]);
                }
                Source::Scripted { pieces, cursor } => {
                    self.queue.push_back(pieces[*cursor]);
                    *cursor = (*cursor + 1) % pieces.len();
                }
            }
        }
    }

    /// Draw the next kind
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        // top_up keeps the queue non-empty; the fallback is unreachable.
        let kind = self.queue.pop_front().unwrap_or(PieceKind::I);
        self.top_up();
        kind
    }

    /// The kind the next `next()` will return
    pub fn peek(&self) -> PieceKind {
        self.queue.front().copied().unwrap_or(PieceKind::I)
    }

    /// Up to seven upcoming kinds, nearest first
    pub fn peek_n(&self, count: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied().take(count.min(LOOKAHEAD))
    }

    /// Fixed-size preview for snapshots
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        let mut out = [PieceKind::I; N];
        for (slot, kind) in out.iter_mut().zip(self.peek_n(N)) {
            *slot = kind;
        }
        out
    }

    /// Start over from the original seed (or the start of the script)
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        self.queue.clear();
        if let Source::Scripted { cursor, .. } = &mut self.source {
            *cursor = 0;
        }
        self.top_up();
    }

    /// Begin a new sequence seeded from the current RNG state, so consecutive
    /// games differ but stay reproducible. Scripted bags rewind.
    pub fn reshuffle(&mut self) {
        self.seed = self.rng.state();
        self.reset();
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn randomizer(&self) -> Option<RandomizerKind> {
        match self.source {
            Source::SevenBag => Some(RandomizerKind::SevenBag),
            Source::Uniform => Some(RandomizerKind::Uniform),
            Source::Scripted { .. } => None,
        }
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}
