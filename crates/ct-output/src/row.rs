//! Plain data row types written by output backends.

use ct_agent::CarState;
use ct_core::Tick;
use ct_sim::Metrics;

/// One live car at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarSnapshotRow {
    pub tick:        u64,
    /// External label, e.g. `car_4`.
    pub car_id:      String,
    pub x:           i32,
    pub y:           i32,
    /// `Up`, `Down`, `Left` or `Right`.
    pub facing:      &'static str,
    /// `None` while the car has nowhere to go.
    pub destination: Option<(i32, i32)>,
}

impl CarSnapshotRow {
    pub fn from_state(tick: Tick, car: &CarState) -> Self {
        Self {
            tick:        tick.0,
            car_id:      car.id.label(),
            x:           car.position.x,
            y:           car.position.y,
            facing:      car.facing.as_str(),
            destination: car.destination.map(|d| (d.x, d.y)),
        }
    }
}

/// Population counters at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub spawned:     u64,
    pub arrived:     u64,
    pub unreachable: u64,
    pub current:     u64,
    pub running:     bool,
}

impl From<&Metrics> for TickSummaryRow {
    fn from(m: &Metrics) -> Self {
        Self {
            tick:        m.tick_count.0,
            spawned:     m.total_spawned,
            arrived:     m.total_arrived,
            unreachable: m.total_unreachable,
            current:     m.current_count as u64,
            running:     m.running,
        }
    }
}
