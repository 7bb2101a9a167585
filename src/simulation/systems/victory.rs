//! Victory check for head-to-head games

use crate::core::types::FactionId;
use crate::simulation::events::EventType;
use crate::simulation::state::SimulationState;
use crate::simulation::systems::TickContext;

/// In a two-faction game, the side left standing wins once the other holds no cells.
/// Games with three or four factions run until stopped.
pub fn check_victory(state: &SimulationState, ctx: &mut TickContext) -> Option<FactionId> {
    if state.factions.len() != 2 {
        return None;
    }

    let survivors: Vec<FactionId> = state
        .factions
        .iter()
        .filter(|f| !f.is_wiped_out())
        .map(|f| f.id)
        .collect();

    match survivors.as_slice() {
        [winner] => {
            ctx.events.push(EventType::Victory { faction: *winner });
            tracing::info!("{} wins at tick {}", winner, state.tick);
            Some(*winner)
        }
        _ => None,
    }
}
