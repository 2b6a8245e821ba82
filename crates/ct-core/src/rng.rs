//! Deterministic per-car and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each car gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (car_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive car IDs uniformly across the seed space.  Car
//! IDs are never reused, so a car's random choices depend only on the global
//! seed and its own ID — not on how many other cars happen to be alive.
//!
//! The simulation-level [`SimRng`] drives global choices (initial placement,
//! random spawn cells) and is only touched by the scheduler.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::CarId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CarRng ───────────────────────────────────────────────────────────────────

/// Per-car deterministic RNG.
///
/// Created when the car is created and stored next to its state in the car
/// store.  Behavior models receive it as `&mut CarRng`.
pub struct CarRng(SmallRng);

impl CarRng {
    /// Seed deterministically from the run's global seed and a car ID.
    pub fn new(global_seed: u64, car: CarId) -> Self {
        let seed = global_seed ^ (car.0 as u64).wrapping_mul(MIXING_CONSTANT);
        CarRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
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

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}

// ── SimRng ───────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (initial car placement, random
/// spawn cells).
///
/// Used only from the single-threaded scheduler.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
