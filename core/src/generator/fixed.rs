use alloc::vec::Vec;

use super::*;

/// Places a predetermined set of mines, used for scripted boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedBoardGenerator {
    mine_coords: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mine_coords: &[Coord2]) -> Self {
        Self {
            mine_coords: mine_coords.to_vec(),
        }
    }

    pub fn mine_coords(&self) -> &[Coord2] {
        &self.mine_coords
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<Grid> {
        config.validate()?;
        let safe = config.validate_coords(safe)?;
        let grid = Grid::from_mine_coords(config.map_size(), &self.mine_coords)?;

        if grid.mine_count() != config.mine_count() || grid[safe].has_mine {
            log::warn!(
                "Fixed layout of {} mines does not fit {:?} with safe start at {:?}",
                grid.mine_count(),
                config,
                safe
            );
            return Err(GameError::InvalidConfiguration {
                map_size: config.map_size(),
                mine_count: grid.mine_count(),
            });
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_places_given_mines() {
        let config = GameConfig::new(3, 2).unwrap();
        let mut generator = FixedBoardGenerator::new(&[(0, 0), (2, 2)]);

        let grid = generator.generate(config, (1, 1)).unwrap();

        assert_eq!(generator.mine_coords(), [(0, 0), (2, 2)]);
        assert!(grid[(0, 0)].has_mine);
        assert!(grid[(2, 2)].has_mine);
        assert_eq!(grid[(1, 1)].neighbor_mine_count, 2);
    }

    #[test]
    fn generate_refuses_mine_on_safe_cell() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut generator = FixedBoardGenerator::new(&[(1, 1)]);

        assert!(matches!(
            generator.generate(config, (1, 1)),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn generate_refuses_count_mismatch() {
        let config = GameConfig::new(3, 2).unwrap();
        // duplicates collapse into one mine
        let mut generator = FixedBoardGenerator::new(&[(0, 0), (0, 0)]);

        assert!(matches!(
            generator.generate(config, (1, 1)),
            Err(GameError::InvalidConfiguration { mine_count: 1, .. })
        ));
    }

    #[test]
    fn generate_refuses_mines_outside_the_board() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut generator = FixedBoardGenerator::new(&[(3, 0)]);

        assert_eq!(
            generator.generate(config, (1, 1)),
            Err(GameError::InvalidCoordinate((3, 0)))
        );
    }
}
