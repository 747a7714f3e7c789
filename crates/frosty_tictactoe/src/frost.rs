//! The frozen-cell mechanic.
//!
//! At the start of each of the first seven turns there is a 33% chance that
//! one empty cell, chosen uniformly, is frozen: unplayable for that turn only.
//! The random source is injected through [`FreezeDice`] so matches can be
//! replayed deterministically.

use crate::{Board, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Chance that a cell freezes on an eligible turn.
pub const FREEZE_PROBABILITY: f64 = 0.33;

/// Last turn on which a freeze may happen.
pub const LAST_FREEZE_TURN: u32 = 7;

/// Source of randomness for the freeze draw.
pub trait FreezeDice: Send {
    /// Returns `true` with the given probability.
    fn roll(&mut self, probability: f64) -> bool;

    /// Returns an index in `0..len`. Only called with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`FreezeDice`] backed by a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R> RngDice<R> {
    /// Wraps an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Dice seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible dice for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> FreezeDice for RngDice<R> {
    fn roll(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Dice that never freeze anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFreeze;

impl FreezeDice for NeverFreeze {
    fn roll(&mut self, _probability: f64) -> bool {
        false
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Returns `true` if a freeze may happen on `turn`.
pub fn can_freeze(turn: u32) -> bool {
    turn <= LAST_FREEZE_TURN
}

/// Draws the frozen cell for `turn`, if any.
///
/// Turns after [`LAST_FREEZE_TURN`] never consult the dice. Otherwise one roll
/// decides whether anything freezes, then one pick chooses among the empty
/// cells in reading order. A pick past the end freezes nothing.
#[instrument(skip(board, dice))]
pub fn draw_frozen_cell(board: &Board, turn: u32, dice: &mut dyn FreezeDice) -> Option<Position> {
    if !can_freeze(turn) {
        return None;
    }

    if !dice.roll(FREEZE_PROBABILITY) {
        return None;
    }

    let empty = board.empty_positions();
    if empty.is_empty() {
        debug!("Freeze rolled but no empty cell remains");
        return None;
    }

    let frozen = empty.get(dice.pick(empty.len())).copied();
    debug!(?frozen, "Cell frozen");
    frozen
}
