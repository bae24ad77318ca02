use serde::{Deserialize, Serialize};

use crate::*;

/// Flag budget of a game, keeps the number of placed flags within `0..=budget`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTracker {
    budget: CellCount,
    count: CellCount,
}

impl FlagTracker {
    pub const fn new(budget: CellCount) -> Self {
        Self { budget, count: 0 }
    }

    pub const fn budget(&self) -> CellCount {
        self.budget
    }

    pub const fn count(&self) -> CellCount {
        self.count
    }

    /// Flags the player may still place.
    pub const fn remaining(&self) -> CellCount {
        self.budget.saturating_sub(self.count)
    }

    /// Flags or unflags a hidden cell, returning the updated grid.
    ///
    /// Revealed cells cannot be flagged, and a new flag is refused once the budget is used up.
    pub fn toggle(&mut self, grid: &Grid, coords: Coord2) -> Result<(Grid, MarkOutcome)> {
        use MarkOutcome::*;

        let coords = grid.validate_coords(coords)?;
        let cell = grid[coords];

        if cell.is_revealed {
            return Ok((grid.clone(), NoChange));
        }

        if cell.is_flagged {
            if self.count == 0 {
                log::warn!("Flag at {:?} found with no flags counted", coords);
                return Ok((grid.clone(), NoChange));
            }
            self.count -= 1;
        } else {
            if self.count >= self.budget {
                log::debug!("No flags left for {:?}", coords);
                return Ok((grid.clone(), NoChange));
            }
            self.count += 1;
        }

        let mut next = grid.clone();
        next[coords].is_flagged = !cell.is_flagged;
        log::debug!(
            "Toggled flag at {:?}, {} of {} placed",
            coords,
            self.count,
            self.budget
        );
        Ok((next, Changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_places_and_removes_a_flag() {
        let grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        let mut flags = FlagTracker::new(1);

        let (flagged, outcome) = flags.toggle(&grid, (0, 0)).unwrap();
        assert_eq!(outcome, MarkOutcome::Changed);
        assert!(flagged[(0, 0)].is_flagged);
        assert_eq!(flags.count(), 1);
        assert_eq!(flags.remaining(), 0);

        let (unflagged, outcome) = flags.toggle(&flagged, (0, 0)).unwrap();
        assert_eq!(outcome, MarkOutcome::Changed);
        assert_eq!(unflagged, grid);
        assert_eq!(flags.count(), 0);
    }

    #[test]
    fn budget_limits_new_flags() {
        let grid = Grid::new(3);
        let mut flags = FlagTracker::new(1);

        let (grid, _) = flags.toggle(&grid, (0, 0)).unwrap();
        let (after, outcome) = flags.toggle(&grid, (1, 1)).unwrap();

        assert_eq!(outcome, MarkOutcome::NoChange);
        assert_eq!(after, grid);
        assert_eq!(flags.count(), 1);
        assert_eq!(flags.budget(), 1);
        assert_eq!(flags.remaining(), 0);
        assert_eq!(after.flagged_count(), 1);
    }

    #[test]
    fn unflagging_with_empty_count_is_refused() {
        let mut grid = Grid::new(2);
        grid[(1, 1)].is_flagged = true;
        let mut flags = FlagTracker::new(1);

        let (after, outcome) = flags.toggle(&grid, (1, 1)).unwrap();

        assert_eq!(outcome, MarkOutcome::NoChange);
        assert!(after[(1, 1)].is_flagged);
        assert_eq!(flags.count(), 0);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut grid = Grid::new(2);
        grid[(0, 1)].is_revealed = true;
        let mut flags = FlagTracker::new(3);

        let (after, outcome) = flags.toggle(&grid, (0, 1)).unwrap();

        assert_eq!(outcome, MarkOutcome::NoChange);
        assert!(!after[(0, 1)].is_flagged);
        assert_eq!(flags.count(), 0);
    }

    #[test]
    fn toggle_rejects_coordinates_outside_the_grid() {
        let mut flags = FlagTracker::new(3);

        assert_eq!(
            flags.toggle(&Grid::new(2), (2, 2)),
            Err(GameError::InvalidCoordinate((2, 2)))
        );
    }
}
