use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that keeps the start cell (or its neighborhood) safe, but other than that is
/// purely random. The same seed always produces the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
    start_policy: StartPolicy,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            start_policy: StartPolicy::default(),
        }
    }

    pub fn with_start_policy(mut self, start_policy: StartPolicy) -> Self {
        self.start_policy = start_policy;
        self
    }

    pub fn start_policy(&self) -> StartPolicy {
        self.start_policy
    }

    fn reserved_cells(&self, config: GameConfig, safe: Coord2) -> Vec<Coord2> {
        use StartPolicy::*;

        let zone: Vec<_> = core::iter::once(safe)
            .chain(NeighborIter::new(safe, config.map_size()))
            .collect();
        let zone_fits =
            usize::from(config.mine_count()) + zone.len() <= usize::from(config.total_cells());

        match self.start_policy {
            SafeCell => alloc::vec![safe],
            SafeZone if !zone_fits => {
                log::warn!("Cannot keep the start zone clear, fallback to a safe start cell");
                alloc::vec![safe]
            }
            SafeZone => zone,
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<Grid> {
        config.validate()?;
        let safe = config.validate_coords(safe)?;

        let reserved = self.reserved_cells(config, safe);
        // reserved cells are marked taken while placing and cleared afterwards
        let mut taken: Array2<bool> =
            Array2::default((config.map_size(), config.map_size()).to_nd_index());
        for &coords in &reserved {
            taken[coords.to_nd_index()] = true;
        }

        let mut free_cells = usize::from(config.total_cells()) - reserved.len();
        let mut mines_placed: CellCount = 0;

        while mines_placed < config.mine_count() && free_cells > 0 {
            let mut place = self.rng.random_range(0..free_cells);
            for cell in taken.iter_mut().filter(|cell| !**cell) {
                if place == 0 {
                    *cell = true;
                    mines_placed += 1;
                    free_cells -= 1;
                    break;
                }
                place -= 1;
            }
        }

        for &coords in &reserved {
            taken[coords.to_nd_index()] = false;
        }

        let grid = Grid::from_mine_mask(&taken)?;

        // double check mine count
        let count = grid.mine_count();
        if count != config.mine_count() {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                count,
                config.mine_count()
            );
        }
        log::debug!(
            "Generated {}x{} board with {} mines, safe start at {:?}",
            config.map_size(),
            config.map_size(),
            count,
            safe
        );
        Ok(grid)
    }
}
