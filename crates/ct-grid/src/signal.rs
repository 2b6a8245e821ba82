//! Traffic-light phase controller.
//!
//! Every light is a two-state machine (green / red) with a fixed toggle
//! period.  The grid only stores `Entity::TrafficLight(id)`; the phase lives
//! here and is addressed by [`LightId`], which is also the light's index in
//! creation order.

use ct_core::{Coord, LightId, Tick};

/// One traffic light and its current phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLight {
    pub id:       LightId,
    pub coord:    Coord,
    pub is_green: bool,
    /// Ticks between toggles.  Always > 0.
    pub period:   u64,
}

impl TrafficLight {
    /// Flip the phase if `tick` falls on this light's period.
    #[inline]
    pub fn update(&mut self, tick: Tick) -> bool {
        if tick.is_due(self.period) {
            self.is_green = !self.is_green;
            true
        } else {
            false
        }
    }
}

/// All lights of a simulation, in creation order.
#[derive(Clone, Debug, Default)]
pub struct Signals {
    lights: Vec<TrafficLight>,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a light and return its ID.  A zero `period` is clamped to 1.
    pub fn add(&mut self, coord: Coord, is_green: bool, period: u64) -> LightId {
        let id = LightId(self.lights.len() as u32);
        self.lights.push(TrafficLight { id, coord, is_green, period: period.max(1) });
        id
    }

    /// Advance every light to `tick`.  Returns how many toggled.
    pub fn update(&mut self, tick: Tick) -> usize {
        self.lights.iter_mut().map(|l| l.update(tick)).filter(|&flipped| flipped).count()
    }

    /// `false` for unknown IDs.
    #[inline]
    pub fn is_green(&self, id: LightId) -> bool {
        self.get(id).is_some_and(|l| l.is_green)
    }

    #[inline]
    pub fn get(&self, id: LightId) -> Option<&TrafficLight> {
        self.lights.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrafficLight> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}
