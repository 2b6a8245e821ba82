//! `ct-map` — symbol legend and text city-map loading.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`legend`]  | `Legend`, `Symbol`, `LightSymbol` (JSON-loadable)         |
//! | [`loader`]  | `CityMap`, `MapCell`, `load_map`, `load_map_reader`       |
//! | [`error`]   | `MapError`, `MapResult<T>`                                |
//!
//! The simulation consumes a [`CityMap`]; it never sees map text.

pub mod error;
pub mod legend;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use legend::{Legend, LightSymbol, Symbol};
pub use loader::{load_map, load_map_reader, CityMap, MapCell};
