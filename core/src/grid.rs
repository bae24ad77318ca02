use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of cells.
///
/// Engine operations never mutate a grid they are handed, they return a new value instead, so two
/// snapshots can be compared with `==` to find out whether anything changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    map_size: Coord,
    cells: Array2<Cell>,
}

impl Grid {
    /// A board without mines, every cell hidden.
    pub fn new(map_size: Coord) -> Self {
        Self {
            map_size,
            cells: Array2::default((map_size, map_size).to_nd_index()),
        }
    }

    /// Builds a board from a mine mask and fills in the neighbor counts.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let map_size = match Coord::try_from(rows) {
            Ok(map_size) if rows == cols => map_size,
            _ => {
                let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
                return Err(GameError::InvalidConfiguration {
                    map_size: Coord::try_from(rows.max(cols)).unwrap_or(Coord::MAX),
                    mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
                });
            }
        };

        let mut grid = Self::new(map_size);
        for coords in grid.coords() {
            grid[coords].has_mine = mine_mask[coords.to_nd_index()];
        }
        grid.fill_neighbor_counts();
        Ok(grid)
    }

    pub fn from_mine_coords(map_size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(map_size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].has_mine = true;
        }
        grid.fill_neighbor_counts();
        Ok(grid)
    }

    fn fill_neighbor_counts(&mut self) {
        for coords in self.coords() {
            let count = if self[coords].has_mine {
                0
            } else {
                self.adjacent_mine_count(coords)
            };
            self[coords].neighbor_mine_count = count;
        }
    }

    pub fn map_size(&self) -> Coord {
        self.map_size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.map_size, self.map_size)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.map_size && col < self.map_size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate(coords))
        }
    }

    /// Bounds-checked access.
    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        self.validate_coords(coords).map(|coords| self[coords])
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        self.get(coords).map(Cell::view)
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let map_size = self.map_size;
        (0..map_size).flat_map(move |row| (0..map_size).map(move |col| (row, col)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.coords().map(|coords| (coords, self[coords]))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.map_size)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count();
        // at most 8 neighbors
        count as u8
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&cell| predicate(cell)).count();
        // bounded by 255 * 255
        count as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.has_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed)
    }

    /// Whether every safe cell has been revealed; mines never need to be flagged.
    pub fn is_cleared(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_revealed || cell.has_mine)
    }

    pub fn revealed_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_revealed && cell.has_mine)
            .map(|(coords, _)| coords)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
