//! RNG module - next-piece randomizer
//!
//! Pieces are drawn by rolling an 8-sided die over the 7 kinds plus a
//! "reroll" face. If the roll lands on the reroll face or repeats the
//! previously drawn kind, the die is rolled once more over the 7 kinds and
//! that result is taken as-is, so repeats are rarer but still possible.
//!
//! Also provides a simple seeded LCG so a seed reproduces a whole game.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits: the low bits of a power-of-two LCG cycle
    /// with a tiny period, which `% 8` would expose directly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Faces on the first die: one per kind plus the reroll face
const FIRST_ROLL_FACES: u32 = 8;

/// Resolve a draw from its two rolls
///
/// `first` is in `0..8`, `second` in `0..7` and only consulted when the first
/// roll is the reroll face or equals the previous kind.
pub fn resolve_draw(previous: Option<PieceKind>, first: u32, second: u32) -> PieceKind {
    let pick = if needs_reroll(previous, first) { second } else { first };
    PieceKind::ALL[pick as usize % PieceKind::ALL.len()]
}

fn needs_reroll(previous: Option<PieceKind>, first: u32) -> bool {
    first as usize >= PieceKind::ALL.len() || previous.is_some_and(|p| p.index() == first as usize)
}

/// Biased no-repeat piece generator
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: SimpleRng,
    last: Option<PieceKind>,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            last: None,
        }
    }

    /// Draw the next kind, biased away from the previous draw
    pub fn draw(&mut self) -> PieceKind {
        let first = self.rng.next_range(FIRST_ROLL_FACES);
        // Only consume a second roll when it is actually needed.
        let second = if needs_reroll(self.last, first) {
            self.rng.next_range(PieceKind::ALL.len() as u32)
        } else {
            0
        };
        let kind = resolve_draw(self.last, first, second);
        self.last = Some(kind);
        kind
    }

    /// Draw the next kind, biased away from `previous` instead of the last draw
    pub fn draw_after(&mut self, previous: PieceKind) -> PieceKind {
        self.last = Some(previous);
        self.draw()
    }

    /// The most recently drawn kind
    pub fn last(&self) -> Option<PieceKind> {
        self.last
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
