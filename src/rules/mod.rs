//! Rule policies selected at configuration time
//!
//! Each rule family is an independent toggle. The defaults are the canonical
//! engine; the other variants reproduce older behaviors as configuration.

pub mod probability;

use serde::{Deserialize, Serialize};

use crate::core::constants::{CORE_DECAY_TICKS, FLAT_ATTACK_CHANCE};
use crate::core::error::ConfigError;

pub use probability::{attack_probability, AttackContext};

/// How attack chances are computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatRule {
    /// Base chance by core status plus attrition, desperation, coalition and morale
    Weighted,
    /// Same chance for every enemy neighbor, no modifiers
    Flat { chance: f64 },
}

impl CombatRule {
    pub fn flat() -> Self {
        CombatRule::Flat {
            chance: FLAT_ATTACK_CHANCE,
        }
    }
}

impl Default for CombatRule {
    fn default() -> Self {
        CombatRule::Weighted
    }
}

/// What happens to a core that has been held for a while
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoreDecayRule {
    /// Cores never decay
    Permanent,
    /// Decays after `after_ticks` held ticks and stays ordinary territory
    Decaying { after_ticks: u32 },
    /// Decays, then stabilizes again after the occupation delay
    Restabilizing { after_ticks: u32 },
    /// Counts only ticks in which the core resisted an attack
    Besieged { after_ticks: u32 },
}

impl Default for CoreDecayRule {
    fn default() -> Self {
        CoreDecayRule::Decaying {
            after_ticks: CORE_DECAY_TICKS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevoltRule {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UprisingRule {
    #[default]
    Enabled,
    Disabled,
}

/// Desperate defense and morale boost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoraleRule {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllianceRule {
    /// Two weakest ally against a dominant faction, recomputed every tick
    #[default]
    Automatic,
    /// The configured pair holds for the whole game
    Forced,
    Disabled,
}

/// The full set of rule policies for a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub combat: CombatRule,
    pub core_decay: CoreDecayRule,
    pub revolt: RevoltRule,
    pub uprising: UprisingRule,
    pub morale: MoraleRule,
    pub alliance: AllianceRule,
}

impl RuleSet {
    /// The earliest variant: flat chances, permanent cores, no comeback mechanics
    pub fn classic() -> Self {
        Self {
            combat: CombatRule::flat(),
            core_decay: CoreDecayRule::Permanent,
            revolt: RevoltRule::Disabled,
            uprising: UprisingRule::Enabled,
            morale: MoraleRule::Disabled,
            alliance: AllianceRule::Disabled,
        }
    }

    /// Reject rule parameters that cannot describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let CombatRule::Flat { chance } = self.combat {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidRule(format!(
                    "flat attack chance {} is outside [0, 1]",
                    chance
                )));
            }
        }

        let decay_after = match self.core_decay {
            CoreDecayRule::Permanent => None,
            CoreDecayRule::Decaying { after_ticks }
            | CoreDecayRule::Restabilizing { after_ticks }
            | CoreDecayRule::Besieged { after_ticks } => Some(after_ticks),
        };
        if decay_after == Some(0) {
            return Err(ConfigError::InvalidRule(
                "core decay needs at least one tick".to_string(),
            ));
        }

        Ok(())
    }
}
