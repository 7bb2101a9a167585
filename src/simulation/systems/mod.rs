//! Per-tick phases
//!
//! Each phase takes the state by `&mut` plus the tick context shared between
//! phases. The clock runs them in order: combat, stabilization, dynamics,
//! victory.

mod combat;
mod dynamics;
mod stabilization;
mod victory;

use crate::core::types::{FactionId, Position};
use crate::simulation::events::EventType;
use crate::territory::{Cell, Grid};

pub use combat::{attack_context, resolve_combat};
pub use dynamics::{dominance_alliance, update_alliances, update_dynamics, update_morale};
pub use stabilization::advance_stabilization;
pub use victory::check_victory;

/// Scratch state for one tick
#[derive(Debug, Clone)]
pub struct TickContext {
    /// Ownership before any phase ran
    pub start_owners: Grid<FactionId>,
    /// Cells whose owner changed this tick
    pub claimed: Grid<bool>,
    /// Cells that survived at least one attack this tick
    pub resisted: Grid<bool>,
    /// Events in the order they happened
    pub events: Vec<EventType>,
    pub captures: usize,
    pub uprisings: usize,
    pub revolts: usize,
}

impl TickContext {
    pub fn begin(grid: &Grid<Cell>) -> Self {
        Self {
            start_owners: grid.map(|c| c.owner),
            claimed: Grid::new(grid.width, grid.height),
            resisted: Grid::new(grid.width, grid.height),
            events: Vec::new(),
            captures: 0,
            uprisings: 0,
            revolts: 0,
        }
    }

    #[inline]
    pub fn is_claimed(&self, pos: Position) -> bool {
        self.claimed.at(pos).copied().unwrap_or(false)
    }

    #[inline]
    pub fn claim(&mut self, pos: Position) {
        self.claimed.set(pos.x, pos.y, true);
    }

    #[inline]
    pub fn start_owner(&self, pos: Position) -> Option<FactionId> {
        self.start_owners.at(pos).copied()
    }
}
