//! FactionRegistry - all factions of a game, indexed by id

use crate::core::constants::FACTION_COLORS;
use crate::core::config::validate_alliance;
use crate::core::error::ConfigError;
use crate::core::types::FactionId;
use crate::faction::Faction;
use crate::territory::{Cell, Grid};

#[derive(Clone, Debug, Default)]
pub struct FactionRegistry {
    factions: Vec<Faction>,
}

impl FactionRegistry {
    /// One faction per id in `0..faction_count`, sized from the starting grid
    pub fn from_grid(faction_count: usize, grid: &Grid<Cell>) -> Self {
        let factions = (0..faction_count)
            .map(|i| {
                let id = FactionId(i as u8);
                let cores = grid.iter().filter(|c| c.owner == id && c.is_core).count();
                let color = FACTION_COLORS[i % FACTION_COLORS.len()];
                let mut faction = Faction::new(id, color, cores);
                faction.cell_count = grid.iter().filter(|c| c.owner == id).count();
                faction
            })
            .collect();

        Self { factions }
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Faction> {
        self.factions.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Faction> {
        self.factions.iter_mut()
    }

    pub fn get(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id.index())
    }

    pub fn get_mut(&mut self, id: FactionId) -> Option<&mut Faction> {
        self.factions.get_mut(id.index())
    }

    /// Recompute core and cell counts from the grid
    pub fn recount(&mut self, grid: &Grid<Cell>) {
        for faction in &mut self.factions {
            faction.core_count = 0;
            faction.cell_count = 0;
        }
        for cell in grid.iter() {
            if let Some(faction) = self.factions.get_mut(cell.owner.index()) {
                faction.cell_count += 1;
                if cell.is_core {
                    faction.core_count += 1;
                }
            }
        }
    }

    pub fn total_cells(&self) -> usize {
        self.factions.iter().map(|f| f.cell_count).sum()
    }

    /// The current alliance pair, lower id first
    pub fn alliance(&self) -> Option<(FactionId, FactionId)> {
        self.factions
            .iter()
            .find_map(|f| {
                f.allied_with
                    .map(|partner| (f.id.min(partner), f.id.max(partner)))
            })
    }

    pub fn are_allied(&self, a: FactionId, b: FactionId) -> bool {
        a != b && self.get(a).and_then(|f| f.allied_with) == Some(b)
    }

    pub fn is_allied(&self, id: FactionId) -> bool {
        self.get(id).map(|f| f.is_allied()).unwrap_or(false)
    }

    /// Replace any existing alliance with `a`-`b`
    pub fn set_alliance(&mut self, a: FactionId, b: FactionId) -> Result<(), ConfigError> {
        validate_alliance(a, b, self.factions.len())?;
        self.clear_alliances();
        self.factions[a.index()].allied_with = Some(b);
        self.factions[b.index()].allied_with = Some(a);
        Ok(())
    }

    pub fn clear_alliances(&mut self) {
        for faction in &mut self.factions {
            faction.allied_with = None;
        }
    }

    /// Every alliance is mutual and there is at most one pair
    pub fn alliances_consistent(&self) -> bool {
        let symmetric = self.factions.iter().all(|f| match f.allied_with {
            Some(partner) => {
                partner != f.id && self.get(partner).and_then(|p| p.allied_with) == Some(f.id)
            }
            None => true,
        });
        let allied = self.factions.iter().filter(|f| f.is_allied()).count();
        symmetric && (allied == 0 || allied == 2)
    }
}
