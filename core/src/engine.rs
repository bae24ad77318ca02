use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Reveals a single cell, cascading through connected zero-count cells.
///
/// Revealed and flagged cells are left untouched. Hitting a mine reports [`RevealOutcome::HitMine`]
/// and stops there; deciding whether the game is won is up to the caller.
pub fn reveal(grid: &Grid, coords: Coord2) -> Result<(Grid, RevealOutcome)> {
    let coords = grid.validate_coords(coords)?;
    let mut next = grid.clone();
    let outcome = reveal_in_place(&mut next, coords);
    Ok((next, outcome))
}

/// Reveals every hidden, unflagged neighbor of an already revealed cell.
///
/// The flags around the cell are not checked against its count, so an unflagged mine next to it
/// ends the game. Neighbors opened before the mine stay open.
pub fn chord_reveal(grid: &Grid, coords: Coord2) -> Result<(Grid, RevealOutcome)> {
    let coords = grid.validate_coords(coords)?;
    if !grid[coords].is_revealed {
        log::trace!("Chord on unrevealed cell {:?} ignored", coords);
        return Ok((grid.clone(), RevealOutcome::NoChange));
    }

    let mut next = grid.clone();
    let outcome = grid
        .iter_neighbors(coords)
        .map(|neighbor_coords| reveal_in_place(&mut next, neighbor_coords))
        .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor);
    Ok((next, outcome))
}

fn reveal_in_place(grid: &mut Grid, coords: Coord2) -> RevealOutcome {
    let cell = grid[coords];
    if !cell.is_revealable() {
        return RevealOutcome::NoChange;
    }

    grid[coords].is_revealed = true;

    if cell.has_mine {
        log::debug!("Revealed mine at {:?}", coords);
        return RevealOutcome::HitMine;
    }

    log::debug!(
        "Revealed cell at {:?}, mine count: {}",
        coords,
        cell.neighbor_mine_count
    );
    if cell.neighbor_mine_count == 0 {
        flood_fill(grid, coords);
    }
    RevealOutcome::Revealed
}

/// Opens the zero region around `origin` and its numbered border, each cell visited once.
fn flood_fill(grid: &mut Grid, origin: Coord2) {
    let mut visited = HashSet::new();
    visited.insert(origin);
    let mut to_visit: Vec<_> = grid.iter_neighbors(origin).collect();

    while let Some(visit_coords) = to_visit.pop() {
        if !visited.insert(visit_coords) {
            continue;
        }

        let cell = grid[visit_coords];
        if !cell.is_revealable() || cell.has_mine {
            log::trace!("Skipping cell at {:?}", visit_coords);
            continue;
        }

        grid[visit_coords].is_revealed = true;
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            visit_coords,
            cell.neighbor_mine_count
        );

        if cell.neighbor_mine_count == 0 {
            to_visit.extend(
                grid.iter_neighbors(visit_coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }
}
