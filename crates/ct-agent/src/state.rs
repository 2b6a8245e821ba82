//! Per-car mutable state.

use std::collections::VecDeque;

use ct_core::{CarId, Coord, Direction};

/// Why a car left the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetireReason {
    /// Reached its destination.
    Arrived,
    /// No destination could be reached after repeated failed searches.
    Unreachable,
}

/// Everything a car knows about itself.
///
/// The car's grid position is owned by the grid; `position` mirrors it and is
/// refreshed by the scheduler right after each applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    pub id:       CarId,
    pub position: Coord,

    /// Goal cell.  `None` until a destination policy assigns one.
    pub destination: Option<Coord>,

    /// Cached route, head first: the next cell to enter is `path[0]`, the
    /// last is the destination.  Empty means "no cached path".
    pub path: VecDeque<Coord>,

    pub facing: Direction,

    /// Consecutive failed route searches.
    pub path_failures: u32,

    /// Consecutive ticks without a change of position.
    pub wait_ticks: u32,

    /// Position at the start of the previous decision.
    pub last_position: Coord,

    /// Set once the car has finished; the scheduler removes it at the end of
    /// the tick.
    pub retired: Option<RetireReason>,
}

impl CarState {
    pub fn new(id: CarId, position: Coord, facing: Direction) -> Self {
        Self {
            id,
            position,
            destination: None,
            path: VecDeque::new(),
            facing,
            path_failures: 0,
            wait_ticks: 0,
            last_position: position,
            retired: None,
        }
    }

    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.retired.is_some()
    }

    /// `true` if the car stands on its destination.
    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.destination == Some(self.position)
    }

    /// Replace the cached route.
    pub fn set_path(&mut self, cells: impl IntoIterator<Item = Coord>) {
        self.path = cells.into_iter().collect();
    }
}
