//! Faction dynamics: recount, morale and alliances

use crate::core::constants::MORALE_BOOST_TICKS;
use crate::core::types::FactionId;
use crate::faction::FactionRegistry;
use crate::rules::{AllianceRule, MoraleRule};
use crate::simulation::events::EventType;
use crate::simulation::state::SimulationState;
use crate::simulation::systems::TickContext;

/// Recount territory, then update morale, alliances and eliminations
pub fn update_dynamics(state: &mut SimulationState, ctx: &mut TickContext) {
    state.factions.recount(&state.grid);
    update_morale(state, ctx);
    update_alliances(state, ctx);
    mark_eliminations(state, ctx);
}

/// Arm desperate defense and morale while heavy losses persist, decay otherwise
pub fn update_morale(state: &mut SimulationState, ctx: &mut TickContext) {
    let rule = state.rules.morale;

    for faction in state.factions.iter_mut() {
        if faction.eliminated {
            faction.desperate_defense = false;
            faction.morale_boost = 0;
            faction.below_threshold = false;
            continue;
        }

        let lost_heavily = faction.has_lost_heavily();

        match rule {
            MoraleRule::Disabled => {
                faction.desperate_defense = false;
                faction.morale_boost = 0;
            }
            MoraleRule::Enabled if lost_heavily => {
                if !faction.below_threshold {
                    ctx.events.push(EventType::MoraleBoostGained {
                        faction: faction.id,
                    });
                    tracing::info!(
                        "{} down to {} of {} cores, morale boost armed",
                        faction.id,
                        faction.core_count,
                        faction.initial_cores
                    );
                }
                faction.desperate_defense = true;
                faction.morale_boost = MORALE_BOOST_TICKS;
            }
            MoraleRule::Enabled => {
                faction.morale_boost = faction.morale_boost.saturating_sub(1);
                if faction.morale_boost == 0 {
                    faction.desperate_defense = false;
                }
            }
        }

        faction.below_threshold = lost_heavily;
    }
}

/// Two weakest surviving factions, if the strongest outweighs them combined
pub fn dominance_alliance(factions: &FactionRegistry) -> Option<(FactionId, FactionId)> {
    let mut ranked: Vec<(usize, FactionId)> = factions
        .iter()
        .filter(|f| f.cell_count > 0)
        .map(|f| (f.core_count, f.id))
        .collect();
    if ranked.len() < 3 {
        return None;
    }
    ranked.sort();

    let (weakest, weakest_id) = ranked[0];
    let (second, second_id) = ranked[1];
    let (strongest, _) = ranked[ranked.len() - 1];

    if strongest > weakest + second {
        Some((weakest_id.min(second_id), weakest_id.max(second_id)))
    } else {
        None
    }
}

/// Recompute the alliance under the configured rule
pub fn update_alliances(state: &mut SimulationState, ctx: &mut TickContext) {
    let before = state.factions.alliance();

    let after = match state.rules.alliance {
        AllianceRule::Disabled => None,
        AllianceRule::Forced => state.forced_alliance,
        AllianceRule::Automatic => dominance_alliance(&state.factions),
    };

    if before == after {
        return;
    }

    state.factions.clear_alliances();
    if let Some(members) = before {
        ctx.events.push(EventType::AllianceDissolved { members });
        tracing::info!("Alliance between {} and {} dissolved", members.0, members.1);
    }
    if let Some((a, b)) = after {
        match state.factions.set_alliance(a, b) {
            Ok(()) => {
                ctx.events.push(EventType::AllianceFormed { members: (a, b) });
                tracing::info!("{} and {} ally against the strongest", a, b);
            }
            Err(e) => tracing::warn!("Alliance not formed: {}", e),
        }
    }
}

fn mark_eliminations(state: &mut SimulationState, ctx: &mut TickContext) {
    for faction in state.factions.iter_mut() {
        if !faction.eliminated && faction.is_wiped_out() {
            faction.eliminated = true;
            faction.desperate_defense = false;
            faction.morale_boost = 0;
            ctx.events.push(EventType::Eliminated {
                faction: faction.id,
            });
            tracing::info!("{} has been eliminated", faction.id);
        }
    }
}
