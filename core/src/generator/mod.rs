use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mined board for a game once the first revealed coordinate is known.
pub trait BoardGenerator {
    /// Places exactly `config.mine_count()` mines, none of them at `safe`, and fills in the neighbor
    /// counts. Every cell of the result is hidden and unflagged.
    ///
    /// The grid must be `config.map_size()` cells wide and hold exactly `config.mine_count()` mines.
    /// A session refuses any other board and stays in its initial status.
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<Grid>;
}

/// Which cells around the first revealed coordinate are kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartPolicy {
    /// Only the first cell itself.
    #[default]
    SafeCell,
    /// The first cell and its whole neighborhood, so the first reveal always cascades.
    SafeZone,
}
