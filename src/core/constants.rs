//! Conquest rule constants - all tunable values in one place
//!
//! Probability modifiers are ADDITIVE. The final attack chance is clamped
//! to [0, 1] before it is compared against a draw.

// Attack probabilities
pub const BASE_ATTACK_CHANCE: f64 = 0.75;
pub const CORE_ATTACK_CHANCE: f64 = 0.25;
pub const FLAT_ATTACK_CHANCE: f64 = 0.5;

// Attrition bonus per failed attack, capped
pub const ATTRITION_STEP: f64 = 0.1;
pub const ATTRITION_CAP: f64 = 0.1;

// Desperate defense: fatigue on the attacker, resolve on the defender
pub const DESPERATE_ATTACKER_PENALTY: f64 = 0.2;
pub const DESPERATE_DEFENDER_BONUS: f64 = 0.25;

// Coalition support for a side allied to a third party
pub const COALITION_SUPPORT: f64 = 0.1;

// Occupation and stabilization
pub const STABILIZATION_DELAY: u32 = 6;
pub const CORE_DECAY_TICKS: u32 = 20;

// Revolt window after capture; chances indexed by elapsed window tick
pub const REVOLT_WINDOW: u32 = 3;
pub const REVOLT_CHANCES: [f64; 3] = [0.10, 0.15, 0.20];

// Uprisings need more than this many ticks of occupation
pub const UPRISING_MIN_AGE: u32 = 3;
pub const UPRISING_CHANCES: [f64; 3] = [0.03, 0.05, 0.07];

// Faction dynamics
pub const DESPERATION_RATIO: f64 = 0.75;
pub const MORALE_BOOST_TICKS: u32 = 10;

// Scheduling
pub const BASE_TICK_MS: f64 = 100.0;
pub const DEFAULT_GRID_SIZE: usize = 200;
/// Largest accepted grid side; 4096^2 cells is about 16.7M
pub const MAX_GRID_SIZE: usize = 4096;
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 1000;

/// Display palette, one color per faction slot
pub const FACTION_COLORS: [&str; 4] = ["#FF0000", "#00FF00", "#0000FF", "#FFFF00"];
