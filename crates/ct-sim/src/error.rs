use thiserror::Error;

use ct_behavior::BehaviorError;
use ct_core::CoreError;
use ct_grid::GridError;
use ct_map::MapError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("the map has no road cells to place {requested} cars on")]
    NoRoads { requested: usize },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
