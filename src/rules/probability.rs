//! Attack probability for a single attacker/defender pair

use crate::core::constants::{
    ATTRITION_CAP, ATTRITION_STEP, BASE_ATTACK_CHANCE, COALITION_SUPPORT, CORE_ATTACK_CHANCE,
    DESPERATE_ATTACKER_PENALTY, DESPERATE_DEFENDER_BONUS,
};
use crate::rules::CombatRule;

/// Everything the resolver knows about one attack
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttackContext {
    pub target_is_core: bool,
    /// Consecutive failed attacks the target has resisted
    pub failed_attempts: u32,
    pub attacker_desperate: bool,
    pub defender_desperate: bool,
    /// Attacker holds an alliance (with anyone)
    pub attacker_allied: bool,
    /// Defender holds an alliance (with anyone)
    pub defender_allied: bool,
    /// Attacker and defender are allied to each other
    pub mutual_alliance: bool,
    pub attacker_morale: bool,
}

fn attrition_bonus(failed_attempts: u32) -> f64 {
    (ATTRITION_STEP * failed_attempts as f64).min(ATTRITION_CAP)
}

/// Chance that the attack succeeds, always within [0, 1]
pub fn attack_probability(rule: &CombatRule, ctx: &AttackContext) -> f64 {
    if ctx.mutual_alliance {
        return 0.0;
    }

    let chance = match *rule {
        CombatRule::Flat { chance } => chance,
        CombatRule::Weighted => {
            if ctx.attacker_morale {
                return 1.0;
            }

            let mut chance = if ctx.target_is_core {
                CORE_ATTACK_CHANCE
            } else {
                BASE_ATTACK_CHANCE
            };
            chance += attrition_bonus(ctx.failed_attempts);

            if ctx.attacker_desperate {
                chance -= DESPERATE_ATTACKER_PENALTY;
            }
            if ctx.defender_desperate {
                chance -= DESPERATE_DEFENDER_BONUS;
            }

            // Mutual alliances returned early, so a flag here means a third party
            if ctx.attacker_allied {
                chance += COALITION_SUPPORT;
            }
            if ctx.defender_allied {
                chance -= COALITION_SUPPORT;
            }

            chance
        }
    };

    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_base_chances() {
        let rule = CombatRule::Weighted;
        let open = AttackContext::default();
        let core = AttackContext {
            target_is_core: true,
            ..Default::default()
        };
        assert!((attack_probability(&rule, &open) - 0.75).abs() < EPS);
        assert!((attack_probability(&rule, &core) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_attrition_is_capped() {
        let rule = CombatRule::Weighted;
        let one = AttackContext {
            target_is_core: true,
            failed_attempts: 1,
            ..Default::default()
        };
        let many = AttackContext {
            failed_attempts: 12,
            ..one
        };
        assert!((attack_probability(&rule, &one) - 0.35).abs() < EPS);
        assert!((attack_probability(&rule, &many) - 0.35).abs() < EPS);
    }

    #[test]
    fn test_desperation_modifiers() {
        let rule = CombatRule::Weighted;
        let tired = AttackContext {
            attacker_desperate: true,
            ..Default::default()
        };
        let stubborn = AttackContext {
            defender_desperate: true,
            ..Default::default()
        };
        assert!((attack_probability(&rule, &tired) - 0.55).abs() < EPS);
        assert!((attack_probability(&rule, &stubborn) - 0.50).abs() < EPS);
    }

    #[test]
    fn test_morale_forces_capture() {
        let rule = CombatRule::Weighted;
        let ctx = AttackContext {
            target_is_core: true,
            attacker_desperate: true,
            defender_desperate: true,
            attacker_morale: true,
            ..Default::default()
        };
        assert_eq!(attack_probability(&rule, &ctx), 1.0);
    }

    #[test]
    fn test_no_friendly_fire() {
        let ctx = AttackContext {
            attacker_allied: true,
            defender_allied: true,
            mutual_alliance: true,
            attacker_morale: true,
            ..Default::default()
        };
        assert_eq!(attack_probability(&CombatRule::Weighted, &ctx), 0.0);
        assert_eq!(attack_probability(&CombatRule::flat(), &ctx), 0.0);
    }

    #[test]
    fn test_coalition_support() {
        let rule = CombatRule::Weighted;
        let backed = AttackContext {
            attacker_allied: true,
            ..Default::default()
        };
        let shielded = AttackContext {
            defender_allied: true,
            ..Default::default()
        };
        assert!((attack_probability(&rule, &backed) - 0.85).abs() < EPS);
        assert!((attack_probability(&rule, &shielded) - 0.65).abs() < EPS);
    }

    #[test]
    fn test_clamped_at_zero() {
        let ctx = AttackContext {
            target_is_core: true,
            attacker_desperate: true,
            defender_desperate: true,
            defender_allied: true,
            ..Default::default()
        };
        assert_eq!(attack_probability(&CombatRule::Weighted, &ctx), 0.0);
    }

    #[test]
    fn test_flat_rule_ignores_modifiers() {
        let ctx = AttackContext {
            target_is_core: true,
            attacker_desperate: true,
            ..Default::default()
        };
        assert_eq!(attack_probability(&CombatRule::flat(), &ctx), 0.5);
        assert_eq!(
            attack_probability(&CombatRule::Flat { chance: 3.0 }, &ctx),
            1.0
        );
    }
}
