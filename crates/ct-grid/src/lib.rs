//! `ct-grid` — city grid, map entities, traffic signals, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid` (dense cells + entity → coord reverse index)         |
//! | [`entity`]  | `Entity`, `EntityKind`                                      |
//! | [`signal`]  | `Signals`, `TrafficLight`                                   |
//! | [`rules`]   | `MoveRules` (road direction, lane, diagonal constraints)    |
//! | [`router`]  | `Router` trait, `RouteQuery`, `Route`, `BfsRouter`          |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod entity;
pub mod error;
pub mod grid;
pub mod router;
pub mod rules;
pub mod signal;


pub use entity::{Entity, EntityKind};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use router::{BfsRouter, Route, RouteQuery, Router, DEFAULT_MAX_EXPANSIONS};
pub use rules::MoveRules;
pub use signal::{Signals, TrafficLight};
