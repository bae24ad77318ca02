#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use flags::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod flags;
mod generator;
mod grid;
mod session;
mod types;

/// Board shape and mine budget of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    map_size: Coord,
    mine_count: CellCount,
}

impl GameConfig {
    /// Smallest side length for which every cell has a neighbor.
    pub const MIN_MAP_SIZE: Coord = 2;

    pub const fn new_unchecked(map_size: Coord, mine_count: CellCount) -> Self {
        Self {
            map_size,
            mine_count,
        }
    }

    pub fn new(map_size: Coord, mine_count: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(map_size, mine_count);
        config.validate()?;
        Ok(config)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(8, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 40)
    }

    /// At least one cell has to stay safe so the first reveal can never hit a mine.
    pub fn validate(&self) -> Result<()> {
        let fits = self.map_size >= Self::MIN_MAP_SIZE
            && self.mine_count > 0
            && self.mine_count < self.total_cells();
        if fits {
            Ok(())
        } else {
            Err(GameError::InvalidConfiguration {
                map_size: self.map_size,
                mine_count: self.mine_count,
            })
        }
    }

    pub const fn map_size(&self) -> Coord {
        self.map_size
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.map_size, self.map_size)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.map_size && col < self.map_size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate(coords))
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the grid could have changed.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing one or more cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    /// Whether the grid could have changed.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Used to merge outcomes when revealing several cells at once.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // a mine has priority
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_at_least_one_safe_cell() {
        assert!(GameConfig::new(8, 10).is_ok());
        assert!(GameConfig::new(2, 3).is_ok());
        assert_eq!(
            GameConfig::new(2, 4),
            Err(GameError::InvalidConfiguration {
                map_size: 2,
                mine_count: 4
            })
        );
        assert!(GameConfig::new(8, 0).is_err());
        assert!(GameConfig::new(1, 1).is_err());
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(GameConfig::beginner().validate(), Ok(()));
        assert_eq!(GameConfig::intermediate().validate(), Ok(()));
        assert_eq!(GameConfig::default().safe_cell_count(), 54);
    }

    #[test]
    fn config_checks_coordinates() {
        let config = GameConfig::beginner();

        assert_eq!(config.validate_coords((7, 7)), Ok((7, 7)));
        assert_eq!(
            config.validate_coords((8, 0)),
            Err(GameError::InvalidCoordinate((8, 0)))
        );
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;

        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | HitMine | NoChange, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());
    }
}
