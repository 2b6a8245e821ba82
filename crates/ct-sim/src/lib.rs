//! `ct-sim` — tick scheduler for the ct city traffic simulation.
//!
//! # Tick loop
//!
//! ```text
//! step():
//!   ① Advance — tick += 1 (no-op once halted).
//!   ② Spawn   — on ticks divisible by spawn_interval, place cars on the
//!               free entry points; an unbroken run of empty waves halts.
//!   ③ Lights  — toggle every light whose period has elapsed.
//!   ④ Cars    — in creation order: decide, then apply MoveTo / Retire to
//!               the grid before the next car decides.
//!   ⑤ Sweep   — remove retired cars, counting arrivals and give-ups.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`sim`]      | `Sim<B>` and the tick loop                          |
//! | [`builder`]  | `SimBuilder` — grid, lights and initial cars        |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                 |
//! | [`view`]     | `EntityView`, `Metrics`                             |
//! | [`error`]    | `SimError`, `SimResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ct_core::SimConfig;
//! use ct_map::{load_map, Legend};
//! use ct_sim::{NoopObserver, Sim};
//!
//! let map = load_map(Path::new("maps/base.txt"), &Legend::default())?;
//! let mut sim = Sim::initialize(SimConfig::default(), &map)?;
//! sim.run(1_000, &mut NoopObserver);
//! println!("{:?}", sim.metrics());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod view;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use view::{EntityView, Metrics};
