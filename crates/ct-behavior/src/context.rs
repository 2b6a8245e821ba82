//! Read-only simulation state passed to every behavior callback.

use ct_core::{Coord, Tick};
use ct_grid::{Grid, Signals};

/// A read-only view of the world handed to one car's decision.
///
/// Built by ct-sim for each car in turn, so the grid already reflects the
/// moves of every car that acted earlier in the same tick.
pub struct SimContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    pub grid: &'a Grid,

    pub signals: &'a Signals,

    /// Every destination cell, in grid enumeration order.
    pub destinations: &'a [Coord],
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        tick:         Tick,
        grid:         &'a Grid,
        signals:      &'a Signals,
        destinations: &'a [Coord],
    ) -> Self {
        Self { tick, grid, signals, destinations }
    }

    /// `true` if `coord` holds a light that is currently red.
    pub fn red_light_at(&self, coord: Coord) -> bool {
        self.grid
            .light_at(coord)
            .is_some_and(|light| !self.signals.is_green(light))
    }
}
