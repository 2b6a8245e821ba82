//! `ct-agent` — car state and storage for the city traffic simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`state`]   | `CarState`, `RetireReason`                                |
//! | [`store`]   | `CarStore` (creation-ordered cars + per-car `CarRng`)     |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.  |

pub mod state;
pub mod store;


pub use state::{CarState, RetireReason};
pub use store::CarStore;
