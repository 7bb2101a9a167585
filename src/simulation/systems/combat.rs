//! Combat resolution across every border
//!
//! Attackers and defenders are decided by start-of-tick ownership, so a cell
//! lost early in the pass still fights for its previous owner. A target can
//! change hands at most once per tick.

use crate::core::types::{FactionId, Position};
use crate::faction::FactionRegistry;
use crate::rules::{attack_probability, AttackContext};
use crate::simulation::events::EventType;
use crate::simulation::state::SimulationState;
use crate::simulation::systems::TickContext;
use crate::territory::Cell;

/// Build the attack context for `attacker` striking `target`, held by `defender`
pub fn attack_context(
    factions: &FactionRegistry,
    attacker: FactionId,
    defender: FactionId,
    target: &Cell,
) -> AttackContext {
    let attacking = factions.get(attacker);
    let defending = factions.get(defender);

    AttackContext {
        target_is_core: target.is_core,
        failed_attempts: target.conquer_attempts,
        attacker_desperate: attacking.map(|f| f.desperate_defense).unwrap_or(false),
        defender_desperate: defending.map(|f| f.desperate_defense).unwrap_or(false),
        attacker_allied: attacking.map(|f| f.is_allied()).unwrap_or(false),
        defender_allied: defending.map(|f| f.is_allied()).unwrap_or(false),
        mutual_alliance: factions.are_allied(attacker, defender),
        attacker_morale: attacking.map(|f| f.has_morale_boost()).unwrap_or(false),
    }
}

/// Every cell attacks each enemy 4-neighbor once, row-major. Returns captures.
pub fn resolve_combat(state: &mut SimulationState, ctx: &mut TickContext) -> usize {
    let width = state.grid.width;
    let height = state.grid.height;
    let mut captures = 0;

    for y in 0..height {
        for x in 0..width {
            let Some(attacker) = ctx.start_owner(Position::new(x, y)) else {
                continue;
            };

            for target in state.grid.neighbors4(x, y) {
                let Some(defender) = ctx.start_owner(target) else {
                    continue;
                };
                if defender == attacker || ctx.is_claimed(target) {
                    continue;
                }
                // Allies never attack each other, and no draw is spent
                if state.factions.are_allied(attacker, defender) {
                    continue;
                }

                let Some(cell) = state.grid.at(target) else {
                    continue;
                };
                let attack = attack_context(&state.factions, attacker, defender, cell);
                let chance = attack_probability(&state.rules.combat, &attack);
                debug_assert!(
                    (0.0..=1.0).contains(&chance),
                    "attack chance {} out of range",
                    chance
                );

                let success = state.rng().roll(chance);

                let Some(cell) = state.grid.at_mut(target) else {
                    continue;
                };
                if success {
                    cell.capture(attacker);
                    ctx.claim(target);
                    ctx.events.push(EventType::Capture {
                        x: target.x,
                        y: target.y,
                        attacker,
                        defender,
                    });
                    captures += 1;
                } else {
                    cell.conquer_attempts = cell.conquer_attempts.saturating_add(1);
                    ctx.resisted.set(target.x, target.y, true);
                }
            }
        }
    }

    ctx.captures += captures;
    captures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::rng::SequenceRng;
    use crate::rules::{AllianceRule, RuleSet};
    use crate::territory::{partition, Grid};

    fn state_with(grid: Grid<Cell>, factions: usize, draws: Vec<f64>) -> SimulationState {
        SimulationState::from_grid(
            grid,
            factions,
            RuleSet::default(),
            Box::new(SequenceRng::new(draws)),
        )
        .unwrap()
    }

    #[test]
    fn test_single_border_capture() {
        // 2x2: column 0 is faction 0, column 1 is faction 1
        let mut state = state_with(partition(2, 2), 2, vec![0.1, 0.9, 0.9, 0.9]);
        let mut ctx = TickContext::begin(&state.grid);

        let captures = resolve_combat(&mut state, &mut ctx);

        // (0,0) takes (1,0) with 0.1 < 0.25; (1,0) still attacks (0,0) for faction 1 and fails
        assert_eq!(captures, 1);
        assert_eq!(state.grid.get(1, 0).unwrap().owner, FactionId(0));
        assert!(!state.grid.get(1, 0).unwrap().is_core);
        assert_eq!(state.grid.get(0, 0).unwrap().conquer_attempts, 1);
        assert!(ctx.claimed.get(1, 0).copied().unwrap());
        assert!(ctx.resisted.get(0, 0).copied().unwrap());
    }

    #[test]
    fn test_claimed_cell_is_not_attacked_twice() {
        // Column layout of a 3-faction 3x3 grid: (1,y) is attacked from both sides
        let mut state = state_with(partition(3, 3), 3, vec![0.0; 64]);
        let mut ctx = TickContext::begin(&state.grid);

        resolve_combat(&mut state, &mut ctx);

        let captured: Vec<_> = ctx
            .events
            .iter()
            .filter_map(|e| match e {
                EventType::Capture { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        let mut unique = captured.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(captured.len(), unique.len());
    }

    #[test]
    fn test_allies_do_not_fight() {
        let config = SimulationConfig::default()
            .with_factions(2)
            .with_grid_size(4)
            .with_forced_alliance(FactionId(0), FactionId(1));
        let draws = SequenceRng::new(vec![0.0; 16]);
        let mut state = SimulationState::with_rng(&config, Box::new(draws)).unwrap();
        state.rules.alliance = AllianceRule::Forced;
        let mut ctx = TickContext::begin(&state.grid);

        assert_eq!(resolve_combat(&mut state, &mut ctx), 0);
        assert!(state.grid.iter().all(|c| c.conquer_attempts == 0));
    }

    #[test]
    fn test_morale_boost_guarantees_capture() {
        let mut state = state_with(partition(2, 2), 2, vec![0.99, 0.99, 0.99, 0.99]);
        state.factions.get_mut(FactionId(1)).unwrap().morale_boost = 5;
        let mut ctx = TickContext::begin(&state.grid);

        resolve_combat(&mut state, &mut ctx);

        // Faction 1 takes both of faction 0's cells; faction 0 fails against cores
        assert_eq!(state.grid.get(0, 0).unwrap().owner, FactionId(1));
        assert_eq!(state.grid.get(0, 1).unwrap().owner, FactionId(1));
    }
}
