//! `ct-core` — foundational types for the city traffic simulation.
//!
//! This crate is a dependency of every other `ct-*` crate.  It intentionally
//! has no `ct-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CarId`, `RoadId`, `LightId`, `DestinationId`, `ObstacleId` |
//! | [`geo`]         | `Coord`, `Direction`                                       |
//! | [`time`]        | `Tick`                                                     |
//! | [`rng`]         | `CarRng` (per-car), `SimRng` (global)                      |
//! | [`config`]      | `SimConfig`, `DriverConfig`, `SpawnPoints`, `DestinationPolicy` |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DestinationPolicy, DriverConfig, SimConfig, SpawnPoints};
pub use error::{CoreError, CoreResult};
pub use geo::{Coord, Direction};
pub use ids::{CarId, DestinationId, LightId, ObstacleId, RoadId};
pub use rng::{CarRng, SimRng};
pub use time::Tick;
