//! Per-cell ownership and occupation state

use serde::{Deserialize, Serialize};

use crate::core::constants::{REVOLT_WINDOW, STABILIZATION_DELAY};
use crate::core::types::FactionId;

/// One grid cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub owner: FactionId,
    /// Stabilized territory, harder to capture
    pub is_core: bool,
    /// Ticks left before a capture stabilizes into a core
    pub occupation_timer: u32,
    /// Ticks since the last ownership change
    pub occupation_age: u32,
    /// Ticks counted toward core decay
    pub core_timer: u32,
    /// Consecutive failed attacks against this cell
    pub conquer_attempts: u32,
    /// Ticks left in the post-capture revolt window
    pub revolt_timer: u32,
    /// Owner before the last capture, kept while a revolt is possible
    pub original_owner: Option<FactionId>,
}

impl Cell {
    /// Starting territory: already a core
    pub fn core(owner: FactionId) -> Self {
        Self {
            owner,
            is_core: true,
            ..Default::default()
        }
    }

    /// Take the cell for `attacker`, opening the revolt window
    pub fn capture(&mut self, attacker: FactionId) {
        let previous = self.owner;
        self.occupy(attacker);
        self.revolt_timer = REVOLT_WINDOW;
        self.original_owner = Some(previous);
    }

    /// Fresh occupation with no revolt window
    pub fn occupy(&mut self, owner: FactionId) {
        self.owner = owner;
        self.is_core = false;
        self.occupation_timer = STABILIZATION_DELAY;
        self.occupation_age = 0;
        self.core_timer = 0;
        self.conquer_attempts = 0;
        self.revolt_timer = 0;
        self.original_owner = None;
    }

    /// Occupation has run its course; the cell is now a core
    pub fn stabilize(&mut self) {
        self.is_core = true;
        self.occupation_timer = 0;
        self.core_timer = 0;
        self.revolt_timer = 0;
        self.original_owner = None;
    }

    /// A held core drifts back into ordinary territory
    ///
    /// With `restabilize` the occupation countdown restarts, so the cell
    /// becomes a core again unless it changes hands first.
    pub fn decay(&mut self, restabilize: bool) {
        self.is_core = false;
        self.core_timer = 0;
        self.occupation_age = 0;
        self.occupation_timer = if restabilize {
            STABILIZATION_DELAY
        } else {
            0
        };
    }

    /// A revolt is possible only inside the window and toward a different owner
    pub fn revolt_target(&self) -> Option<FactionId> {
        match self.original_owner {
            Some(original) if self.revolt_timer > 0 && original != self.owner => Some(original),
            _ => None,
        }
    }
}
