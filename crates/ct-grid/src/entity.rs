//! Typed references to everything that can occupy a grid cell.
//!
//! Cells never hold trait objects; they hold small `Copy` tags.  Immutable
//! data travels inside the tag (a road's direction), mutable data lives in
//! its owner and is looked up by ID (a light's phase lives in
//! [`Signals`][crate::Signals], a car's state in the car store).

use std::fmt;

use ct_core::{CarId, DestinationId, Direction, LightId, ObstacleId, RoadId};

/// The kind tag used by grid enumeration queries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Road,
    Obstacle,
    Destination,
    TrafficLight,
    Car,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Road         => "road",
            EntityKind::Obstacle     => "obstacle",
            EntityKind::Destination  => "destination",
            EntityKind::TrafficLight => "traffic_light",
            EntityKind::Car          => "car",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occupant of a grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entity {
    /// A road segment and the direction traffic must travel on it.
    Road(RoadId, Direction),
    Obstacle(ObstacleId),
    Destination(DestinationId),
    TrafficLight(LightId),
    Car(CarId),
}

impl Entity {
    #[inline]
    pub fn kind(self) -> EntityKind {
        match self {
            Entity::Road(..)        => EntityKind::Road,
            Entity::Obstacle(_)     => EntityKind::Obstacle,
            Entity::Destination(_)  => EntityKind::Destination,
            Entity::TrafficLight(_) => EntityKind::TrafficLight,
            Entity::Car(_)          => EntityKind::Car,
        }
    }

    /// External label such as `r_3` or `car_12`.
    pub fn label(self) -> String {
        match self {
            Entity::Road(id, _)      => id.label(),
            Entity::Obstacle(id)     => id.label(),
            Entity::Destination(id)  => id.label(),
            Entity::TrafficLight(id) => id.label(),
            Entity::Car(id)          => id.label(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
