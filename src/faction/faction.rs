//! Faction - one competing side and its aggregate stats

use serde::{Deserialize, Serialize};

use crate::core::constants::DESPERATION_RATIO;
use crate::core::types::FactionId;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    /// Display only
    pub color: String,

    // Territory, recomputed from the grid every tick
    pub initial_cores: usize,
    pub core_count: usize,
    pub cell_count: usize,

    // Comeback mechanics
    pub desperate_defense: bool,
    pub morale_boost: u32,
    /// Whether the core-loss condition held at the last dynamics pass
    pub below_threshold: bool,

    // Diplomacy
    pub allied_with: Option<FactionId>,

    pub eliminated: bool,
}

impl Faction {
    pub fn new(id: FactionId, color: impl Into<String>, initial_cores: usize) -> Self {
        Self {
            id,
            color: color.into(),
            initial_cores,
            core_count: initial_cores,
            cell_count: initial_cores,
            desperate_defense: false,
            morale_boost: 0,
            below_threshold: false,
            allied_with: None,
            eliminated: false,
        }
    }

    /// Lost more than a quarter of the starting cores
    pub fn has_lost_heavily(&self) -> bool {
        (self.core_count as f64) < DESPERATION_RATIO * self.initial_cores as f64
    }

    pub fn has_morale_boost(&self) -> bool {
        self.morale_boost > 0
    }

    pub fn is_allied(&self) -> bool {
        self.allied_with.is_some()
    }

    /// No cores and no cells left
    pub fn is_wiped_out(&self) -> bool {
        self.core_count == 0 && self.cell_count == 0
    }
}
