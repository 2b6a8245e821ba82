//! Read-only views handed to external consumers (renderers, writers).

use ct_core::{CarId, Coord, DestinationId, Direction, LightId, ObstacleId, RoadId, Tick};

/// One entity as reported by [`Sim::enumerate`][crate::Sim::enumerate].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityView {
    Road { id: RoadId, coord: Coord, direction: Direction },
    TrafficLight { id: LightId, coord: Coord, is_green: bool },
    Car { id: CarId, coord: Coord },
    Destination { id: DestinationId, coord: Coord },
    Obstacle { id: ObstacleId, coord: Coord },
}

impl EntityView {
    pub fn coord(&self) -> Coord {
        match *self {
            EntityView::Road { coord, .. }
            | EntityView::TrafficLight { coord, .. }
            | EntityView::Car { coord, .. }
            | EntityView::Destination { coord, .. }
            | EntityView::Obstacle { coord, .. } => coord,
        }
    }

    /// External label such as `car_3` or `tl_0`.
    pub fn label(&self) -> String {
        match *self {
            EntityView::Road { id, .. }         => id.label(),
            EntityView::TrafficLight { id, .. } => id.label(),
            EntityView::Car { id, .. }          => id.label(),
            EntityView::Destination { id, .. }  => id.label(),
            EntityView::Obstacle { id, .. }     => id.label(),
        }
    }
}

/// Population counters after the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Cars ever created, initial cars included.
    pub total_spawned:     u64,
    pub total_arrived:     u64,
    pub total_unreachable: u64,
    /// Cars currently on the grid.
    pub current_count:     usize,
    pub tick_count:        Tick,
    pub running:           bool,
}
