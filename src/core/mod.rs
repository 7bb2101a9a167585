pub mod config;
pub mod constants;
pub mod error;
pub mod rng;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ConfigError, FrontlineError, Result};
pub use rng::{RandomSource, SequenceRng};
pub use types::{FactionId, Phase, Position, Tick};
