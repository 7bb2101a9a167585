//! Read-only snapshots handed to presentation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{FactionId, Phase, Tick};
use crate::simulation::events::Event;
use crate::simulation::state::SimulationState;

/// What a renderer needs for one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub owner: FactionId,
    pub is_core: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactionView {
    pub id: FactionId,
    pub color: String,
    pub core_count: usize,
    pub cell_count: usize,
    pub desperate_defense: bool,
    pub morale_boost: u32,
    pub allied_with: Option<FactionId>,
}

/// Full grid state after a tick, cells in row-major order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub phase: Phase,
    pub grid_size: usize,
    pub cells: Vec<CellView>,
    pub factions: Vec<FactionView>,
}

impl Snapshot {
    pub fn capture(state: &SimulationState, phase: Phase) -> Self {
        let cells = state
            .grid
            .positions()
            .zip(state.grid.iter())
            .map(|(pos, cell)| CellView {
                x: pos.x,
                y: pos.y,
                owner: cell.owner,
                is_core: cell.is_core,
            })
            .collect();

        let factions = state
            .factions
            .iter()
            .map(|f| FactionView {
                id: f.id,
                color: f.color.clone(),
                core_count: f.core_count,
                cell_count: f.cell_count,
                desperate_defense: f.desperate_defense,
                morale_boost: f.morale_boost,
                allied_with: f.allied_with,
            })
            .collect();

        Self {
            tick: state.tick,
            phase,
            grid_size: state.grid_size(),
            cells,
            factions,
        }
    }

    pub fn owner_at(&self, x: usize, y: usize) -> Option<FactionId> {
        if x >= self.grid_size || y >= self.grid_size {
            return None;
        }
        self.cells.get(y * self.grid_size + x).map(|c| c.owner)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Tick {} ({:?}), {}x{} grid",
            self.tick, self.phase, self.grid_size, self.grid_size
        )];
        for f in &self.factions {
            let mut line = format!(
                "  {} {}: {} cells, {} cores",
                f.id, f.color, f.cell_count, f.core_count
            );
            if f.desperate_defense {
                line.push_str(", desperate");
            }
            if let Some(ally) = f.allied_with {
                line.push_str(&format!(", allied with {}", ally));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

/// Receives a snapshot and the tick's events after every tick
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Snapshot, events: &[Event]);
}

/// Keeps everything it is handed; mostly useful in tests
#[derive(Debug, Default)]
pub struct SnapshotRecorder {
    pub snapshots: Vec<Snapshot>,
    pub events: Vec<Event>,
}

impl SnapshotSink for SnapshotRecorder {
    fn publish(&mut self, snapshot: &Snapshot, events: &[Event]) {
        self.snapshots.push(snapshot.clone());
        self.events.extend_from_slice(events);
    }
}
