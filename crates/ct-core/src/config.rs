//! Simulation configuration.
//!
//! Typically built in code or loaded from JSON by the application crate (with
//! the `serde` feature) and handed to the simulation builder.  All fields
//! have defaults matching the reference scenario, so a config file only needs
//! to mention what it changes.

use crate::{Coord, CoreError, CoreResult};

// ── DestinationPolicy ────────────────────────────────────────────────────────

/// How a car without a destination picks one.
///
/// A simulation uses exactly one policy for its whole run; it applies both at
/// spawn time and whenever a car finds itself without a destination.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DestinationPolicy {
    /// Closest destination by Euclidean distance; ties go to the first one in
    /// grid enumeration order.
    Nearest,
    /// Uniformly random, drawn from the car's own RNG.
    #[default]
    Random,
}

// ── SpawnPoints ──────────────────────────────────────────────────────────────

/// Where spawn waves create new cars.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnPoints {
    /// The four map corners that hold a road.  Cars stay parked until the
    /// first wave has placed at least one car.
    #[default]
    Corners,
    /// `per_wave` distinct random road cells with no car on them.
    RandomRoads { per_wave: usize },
    /// An explicit list of entry cells.
    Fixed(Vec<Coord>),
}

// ── DriverConfig ─────────────────────────────────────────────────────────────

/// Tuning constants for the per-car decision layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Ticks without moving before a car reroutes around occupied cells.
    pub stuck_threshold: u32,

    /// Consecutive failed searches before the car gives up on its
    /// destination and looks for another.
    pub max_path_failures: u32,

    /// Node expansions after which a single search is abandoned.
    pub max_search_expansions: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            stuck_threshold:       10,
            max_path_failures:     5,
            max_search_expansions: 10_000,
        }
    }
}

// ── SimConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Cars placed on random road cells at initialization.
    pub initial_car_count: usize,

    /// A spawn wave runs on every tick divisible by this value.  Must be > 0.
    pub spawn_interval: u64,

    /// Consecutive spawn waves that create no car before the simulation is
    /// considered saturated and halts.
    pub saturation_waves: u32,

    pub spawn_points: SpawnPoints,

    pub destination_policy: DestinationPolicy,

    pub driver: DriverConfig,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Observers receive a car snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_car_count:     0,
            spawn_interval:        10,
            saturation_waves:      5,
            spawn_points:          SpawnPoints::default(),
            destination_policy:    DestinationPolicy::default(),
            driver:                DriverConfig::default(),
            seed:                  42,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject values the scheduler cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.spawn_interval == 0 {
            return Err(CoreError::Config("spawn_interval must be at least 1".into()));
        }
        if self.saturation_waves == 0 {
            return Err(CoreError::Config("saturation_waves must be at least 1".into()));
        }
        if self.driver.stuck_threshold == 0 {
            return Err(CoreError::Config("driver.stuck_threshold must be at least 1".into()));
        }
        if self.driver.max_path_failures == 0 {
            return Err(CoreError::Config("driver.max_path_failures must be at least 1".into()));
        }
        if self.driver.max_search_expansions == 0 {
            return Err(CoreError::Config(
                "driver.max_search_expansions must be at least 1".into(),
            ));
        }
        if let SpawnPoints::RandomRoads { per_wave: 0 } = self.spawn_points {
            return Err(CoreError::Config("spawn_points.per_wave must be at least 1".into()));
        }
        Ok(())
    }

    /// Cars wait for the first successful spawn wave before driving.
    #[inline]
    pub fn holds_until_first_spawn(&self) -> bool {
        matches!(self.spawn_points, SpawnPoints::Corners)
    }
}
