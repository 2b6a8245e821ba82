//! Grid-subsystem error type.

use thiserror::Error;

use ct_core::Coord;

use crate::Entity;

/// Errors produced by `ct-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidSize { width: i32, height: i32 },

    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    OutOfBounds { coord: Coord, width: i32, height: i32 },

    #[error("{entity} is already placed at {at}")]
    AlreadyPlaced { entity: Entity, at: Coord },

    #[error("{0} is not on the grid")]
    NotPlaced(Entity),

    #[error("no route from {from} to {to}")]
    NoRoute { from: Coord, to: Coord },

    #[error("search from {from} to {to} abandoned after {expansions} expansions")]
    SearchExhausted { from: Coord, to: Coord, expansions: usize },
}

pub type GridResult<T> = Result<T, GridError>;
