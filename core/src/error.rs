use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {coords:?} are outside of a {size:?} board")]
    OutOfBounds { coords: Coord2, size: Coord2 },
    #[error("Board must be at least 1x1")]
    EmptyBoard,
    #[error("Too many mines: requested {mines} but at most {capacity} fit outside the spawn protection")]
    TooManyMines { mines: CellCount, capacity: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
