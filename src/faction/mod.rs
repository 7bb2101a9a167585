//! Factions and their registry

pub mod faction;
pub mod registry;

pub use faction::Faction;
pub use registry::FactionRegistry;
