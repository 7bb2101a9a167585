//! Game configuration with documented defaults
//!
//! A configuration is validated once, before any state is built. Rule
//! constants live in `core::constants`; this struct holds the choices a
//! player or a config file makes for a single game.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    BASE_TICK_MS, DEFAULT_EVENT_LOG_CAPACITY, DEFAULT_GRID_SIZE, MAX_GRID_SIZE,
};
use crate::core::error::{ConfigError, Result};
use crate::core::types::FactionId;
use crate::rules::RuleSet;

/// Configuration for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of competing factions (2, 3 or 4)
    ///
    /// Also selects the starting layout:
    /// - 2: left and right halves
    /// - 3: three vertical bands
    /// - 4: quadrants
    pub faction_count: usize,

    /// Width and height of the square grid, in cells
    pub grid_size: usize,

    /// Playback speed relative to the base 100ms tick
    ///
    /// 0.5 gives 200ms ticks, 2.0 gives 50ms ticks. Only the scheduler
    /// reads this; tick outcomes do not depend on it.
    pub speed_multiplier: f64,

    /// Seed for the draw stream. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Alliance applied at game start
    ///
    /// Under the automatic alliance rule this pair only lasts until the
    /// first recomputation.
    pub forced_alliance: Option<(FactionId, FactionId)>,

    /// Rule policies for combat, cores, revolts, morale and alliances
    pub rules: RuleSet,

    /// How many recent events the history log retains
    pub event_log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            faction_count: 2,
            grid_size: DEFAULT_GRID_SIZE,
            speed_multiplier: 1.0,
            seed: None,
            forced_alliance: None,
            rules: RuleSet::default(),
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factions(mut self, faction_count: usize) -> Self {
        self.faction_count = faction_count;
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_forced_alliance(mut self, a: FactionId, b: FactionId) -> Self {
        self.forced_alliance = Some((a, b));
        self
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Smallest grid on which every faction gets at least one cell
    fn min_grid_size(&self) -> usize {
        match self.faction_count {
            3 => 3,
            _ => 2,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(2..=4).contains(&self.faction_count) {
            return Err(ConfigError::UnsupportedFactionCount(self.faction_count));
        }

        if self.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }

        if self.grid_size < self.min_grid_size() {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                factions: self.faction_count,
            });
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }

        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed_multiplier));
        }

        if let Some((a, b)) = self.forced_alliance {
            validate_alliance(a, b, self.faction_count)?;
        }

        self.rules.validate()
    }

    /// Wall-clock time between scheduled ticks
    pub fn tick_interval(&self) -> Duration {
        tick_interval_for(self.speed_multiplier)
    }
}

/// Tick interval for a speed multiplier (base 100ms)
pub fn tick_interval_for(speed_multiplier: f64) -> Duration {
    let nanos = BASE_TICK_MS * 1_000_000.0 / speed_multiplier;
    Duration::from_nanos(nanos.round() as u64)
}

/// An alliance needs two distinct factions that exist in this game
pub fn validate_alliance(
    a: FactionId,
    b: FactionId,
    faction_count: usize,
) -> std::result::Result<(), ConfigError> {
    if a == b || a.index() >= faction_count || b.index() >= faction_count {
        return Err(ConfigError::InvalidAlliance(a, b));
    }
    Ok(())
}
