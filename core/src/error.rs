use thiserror::Error;

use crate::{Action, CellCount, Coord, Coord2, GameStatus};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mine_count} mines on a {map_size}x{map_size} board")]
    InvalidConfiguration { map_size: Coord, mine_count: CellCount },
    #[error("Invalid coordinates {0:?}")]
    InvalidCoordinate(Coord2),
    #[error("{action:?} is not accepted while the game is {status:?}")]
    IllegalTransition { action: Action, status: GameStatus },
}

pub type Result<T> = core::result::Result<T, GameError>;
