//! Error types for the SOS crate

use crate::board::Pos;
use thiserror::Error;

/// Main error type for the SOS crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {pos} is out of bounds for a {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },

    #[error("cell {pos} is already occupied")]
    CellOccupied { pos: Pos },

    #[error("invalid sign '{0}': expected 'S' or 'O'")]
    InvalidSign(char),

    #[error("no legal moves available")]
    NoMovesAvailable,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
