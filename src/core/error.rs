use thiserror::Error;

use crate::core::types::FactionId;

/// Rejected configurations. A simulation is never built from one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unsupported faction count: {0} (expected 2, 3 or 4)")]
    UnsupportedFactionCount(usize),

    #[error("Invalid grid size: {0}")]
    InvalidGridSize(usize),

    #[error("Grid size {size} is too small for {factions} factions")]
    GridTooSmall { size: usize, factions: usize },

    #[error("Grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: usize, max: usize },

    #[error("Grid must be square, got {width}x{height}")]
    NonSquareGrid { width: usize, height: usize },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Invalid speed multiplier: {0}")]
    InvalidSpeed(f64),

    #[error("Invalid alliance between {0:?} and {1:?}")]
    InvalidAlliance(FactionId, FactionId),
}

#[derive(Error, Debug)]
pub enum FrontlineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FrontlineError>;
