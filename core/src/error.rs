use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Minefield needs at least one row and one column")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mines were already placed")]
    AlreadyPopulated,
    #[error("Mines have not been placed yet")]
    NotPopulated,
    #[error("Adjacency was already computed")]
    AlreadyComputed,
    #[error("Adjacency has not been computed yet")]
    NotReady,
    #[error("Tile is flagged, unflag it before revealing")]
    FlaggedTile,
    #[error("Generated mine layout does not satisfy the placement rules")]
    InvalidLayout,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
