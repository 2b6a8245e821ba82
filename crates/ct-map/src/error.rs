use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("map row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown map symbol {ch:?} at row {row}, column {col}")]
    UnknownSymbol { ch: char, row: usize, col: usize },

    #[error("invalid legend: {0}")]
    Legend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("legend JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MapResult<T> = Result<T, MapError>;
