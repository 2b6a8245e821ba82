//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! `step()`.  Tick 0 is the state right after initialization; the first
//! processed tick is tick 1, so cadence checks such as
//! `tick % spawn_interval == 0` never fire during setup.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` when a cadence of `period` ticks fires on this tick.
    ///
    /// A zero period never fires.
    #[inline]
    pub fn is_due(self, period: u64) -> bool {
        period != 0 && self.0 % period == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
