//! Deterministic per-LE RNG.
//!
//! # Determinism strategy
//!
//! Each LE gets its own independent `SmallRng` whose seed is a pure
//! function of the run seed and the LE's identity within the run:
//!
//!   seed = run_seed XOR mix(le_index) XOR mix(step, round, spill)
//!
//! The mixing constants are 64-bit fractional parts of the golden ratio
//! and its square, which spread consecutive indices uniformly across the
//! seed space.  This means:
//!
//! - LEs never share RNG state (no contention, no ordering dependency —
//!   perturbing LE 7 draws the same numbers whether it is processed first
//!   or last, sequentially or on a Rayon worker).
//! - Any (step, round) pair can be replayed exactly by reconstructing the
//!   RNG from the same identity components.
//! - Streams are run-scoped: a different run seed decorrelates everything.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::LeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Second mixing constant (fractional part of phi squared) for the
/// step/round/spill components, so they land in a different lattice than
/// the LE index.
const MIXING_CONSTANT_2: u64 = 0x2545_f491_4f6c_dd1d;

/// Per-LE deterministic RNG.
///
/// Constructed fresh for each LE inside an uncertainty `get_move` pass;
/// never stored, never shared.
pub struct LeRng(SmallRng);

impl LeRng {
    /// Seed deterministically from the run seed and one LE's identity
    /// within the run: batch index, step index, per-step draw round, and
    /// the owning spill's id.
    pub fn new(run_seed: u64, le: LeId, step_index: u32, round: u32, spill_id: u32) -> Self {
        let identity = ((step_index as u64) << 40)
            ^ ((round as u64) << 20)
            ^ (spill_id as u64);
        let seed = run_seed
            ^ (le.0 as u64).wrapping_mul(MIXING_CONSTANT)
            ^ identity.wrapping_mul(MIXING_CONSTANT_2);
        LeRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
