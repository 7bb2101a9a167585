//! Starting layouts: halves, thirds, quadrants

use crate::core::types::FactionId;
use crate::territory::{Cell, Grid};

/// Owner of (x, y) at game start
///
/// Boundaries follow real-valued division, so a size that does not divide
/// evenly gives the extra column to the lower-numbered faction.
pub fn initial_owner(x: usize, y: usize, size: usize, faction_count: usize) -> FactionId {
    let id = match faction_count {
        3 => {
            if 3 * x < size {
                0
            } else if 3 * x < 2 * size {
                1
            } else {
                2
            }
        }
        4 => {
            let right = 2 * x >= size;
            let bottom = 2 * y >= size;
            match (bottom, right) {
                (false, false) => 0,
                (false, true) => 1,
                (true, false) => 2,
                (true, true) => 3,
            }
        }
        _ => {
            if 2 * x < size {
                0
            } else {
                1
            }
        }
    };
    FactionId(id)
}

/// Square grid split between factions, every cell a starting core
pub fn partition(size: usize, faction_count: usize) -> Grid<Cell> {
    Grid::from_fn(size, size, |x, y| {
        Cell::core(initial_owner(x, y, size, faction_count))
    })
}
