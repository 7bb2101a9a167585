//! SimulationState - the single owned aggregate mutated by each tick phase

use crate::core::config::SimulationConfig;
use crate::core::constants::REVOLT_WINDOW;
use crate::core::error::{ConfigError, FrontlineError, Result};
use crate::core::rng::{default_source, RandomSource};
use crate::core::types::{FactionId, Tick};
use crate::faction::FactionRegistry;
use crate::rules::RuleSet;
use crate::territory::{partition, Cell, Grid};

pub struct SimulationState {
    pub grid: Grid<Cell>,
    pub factions: FactionRegistry,
    pub rules: RuleSet,
    pub tick: Tick,
    /// Pair held by the forced alliance rule
    pub forced_alliance: Option<(FactionId, FactionId)>,
    /// Single draw stream for every decision
    pub(crate) rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationState")
            .field("grid_size", &self.grid.width)
            .field("factions", &self.factions)
            .field("rules", &self.rules)
            .field("tick", &self.tick)
            .field("forced_alliance", &self.forced_alliance)
            .finish_non_exhaustive()
    }
}

impl SimulationState {
    /// Fresh game from a config, drawing from the configured seed
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        Self::with_rng(config, default_source(config.seed))
    }

    /// Fresh game with an injected draw source
    pub fn with_rng(config: &SimulationConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        let grid = partition(config.grid_size, config.faction_count);
        let mut state = Self::from_grid(grid, config.faction_count, config.rules, rng)?;

        if let Some((a, b)) = config.forced_alliance {
            state.factions.set_alliance(a, b)?;
            state.forced_alliance = Some((a, b));
        }

        Ok(state)
    }

    /// Game on a prepared grid. Starting cores are whatever the grid marks as core.
    pub fn from_grid(
        grid: Grid<Cell>,
        faction_count: usize,
        rules: RuleSet,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        if !(2..=4).contains(&faction_count) {
            return Err(ConfigError::UnsupportedFactionCount(faction_count).into());
        }
        if grid.is_empty() {
            return Err(ConfigError::InvalidGridSize(0).into());
        }
        if grid.width != grid.height {
            return Err(ConfigError::NonSquareGrid {
                width: grid.width,
                height: grid.height,
            }
            .into());
        }
        if let Some(cell) = grid.iter().find(|c| c.owner.index() >= faction_count) {
            return Err(FrontlineError::InvariantViolation(format!(
                "grid cell owned by {} in a {}-faction game",
                cell.owner, faction_count
            )));
        }

        let factions = FactionRegistry::from_grid(faction_count, &grid);

        Ok(Self {
            grid,
            factions,
            rules,
            tick: 0,
            forced_alliance: None,
            rng,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid.width
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Live cells per faction, indexed by id
    pub fn cell_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.factions.len()];
        for cell in self.grid.iter() {
            if let Some(count) = counts.get_mut(cell.owner.index()) {
                *count += 1;
            }
        }
        counts
    }

    /// Structural invariants that must hold between ticks
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let faction_count = self.factions.len();

        for (pos, cell) in self.grid.positions().zip(self.grid.iter()) {
            if cell.owner.index() >= faction_count {
                return Err(format!(
                    "cell ({}, {}) owned by unknown {}",
                    pos.x, pos.y, cell.owner
                ));
            }
            if cell.is_core && cell.occupation_timer != 0 {
                return Err(format!(
                    "core at ({}, {}) still occupied for {} ticks",
                    pos.x, pos.y, cell.occupation_timer
                ));
            }
            if cell.revolt_timer > REVOLT_WINDOW {
                return Err(format!(
                    "revolt timer {} at ({}, {})",
                    cell.revolt_timer, pos.x, pos.y
                ));
            }
        }

        if self.factions.total_cells() != self.grid.len() {
            return Err(format!(
                "faction cell counts sum to {} on a grid of {}",
                self.factions.total_cells(),
                self.grid.len()
            ));
        }

        for faction in self.factions.iter() {
            let cores = self
                .grid
                .iter()
                .filter(|c| c.owner == faction.id && c.is_core)
                .count();
            if cores != faction.core_count {
                return Err(format!(
                    "{} reports {} cores, grid holds {}",
                    faction.id, faction.core_count, cores
                ));
            }
        }

        if !self.factions.alliances_consistent() {
            return Err("alliance membership is not symmetric".into());
        }

        Ok(())
    }
}
