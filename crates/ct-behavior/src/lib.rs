//! `ct-behavior` — car behavior model trait, intents, and the layered driver.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum (`MoveTo`, `Retire`)                              |
//! | [`context`] | `SimContext<'a>` — read-only world view for one car's decision  |
//! | [`model`]   | `BehaviorModel` trait, `CarUpdate`                              |
//! | [`driver`]  | `LayeredDriver<R>` — the default five-layer driver              |
//! | [`policy`]  | `choose_destination`, `alternatives_by_distance`                |
//! | [`noop`]    | `NoopBehavior` — cars that never move                           |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The tick loop in ct-sim visits cars one at a time:
//!
//! 1. **Decide**: build a `SimContext` over the current grid and call
//!    `BehaviorModel::decide` for the car.  No mutation.
//!
//! 2. **Apply**: move the car on the grid according to its `Intent`s and
//!    store the returned state, before the next car decides.
//!
//! Because a car sees every earlier car's move, two cars can never claim the
//! same cell in one tick.

pub mod context;
pub mod driver;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod policy;

#[cfg(test)]
mod tests;

pub use context::SimContext;
pub use driver::LayeredDriver;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::{BehaviorModel, CarUpdate};
pub use noop::NoopBehavior;
pub use policy::{alternatives_by_distance, choose_destination};
