//! Simulation state, per-tick phases and the clock that drives them

pub mod clock;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod systems;

pub use clock::{Simulation, TickReport};
pub use events::{Event, EventLog, EventType};
pub use snapshot::{CellView, FactionView, Snapshot, SnapshotRecorder, SnapshotSink};
pub use state::SimulationState;
