//! Frontline - territorial conquest on a square grid
//!
//! Two to four factions fight over neighboring cells. Captures stabilize into
//! cores, recent conquests can revolt, long-held territory can rise up, and
//! losing factions get desperate defense, morale boosts and alliances.

pub mod core;
pub mod faction;
pub mod rules;
pub mod simulation;
pub mod territory;

pub use crate::core::{FactionId, FrontlineError, Phase, Result, SimulationConfig};
pub use crate::simulation::{Event, EventType, Simulation, Snapshot, TickReport};
