//! Occupation aging, core decay, revolts and uprisings
//!
//! Runs after combat. Cells that changed hands this tick are skipped, and a
//! cell that revolts or is reverted by an uprising is claimed so later cells
//! in the pass leave it alone.

use crate::core::constants::{REVOLT_CHANCES, REVOLT_WINDOW, UPRISING_CHANCES, UPRISING_MIN_AGE};
use crate::core::types::Position;
use crate::rules::{CoreDecayRule, RevoltRule, UprisingRule};
use crate::simulation::events::EventType;
use crate::simulation::state::SimulationState;
use crate::simulation::systems::TickContext;
use crate::territory::Cell;

/// Advance every cell not claimed this tick. Returns (uprisings, revolts).
pub fn advance_stabilization(
    state: &mut SimulationState,
    ctx: &mut TickContext,
) -> (usize, usize) {
    let width = state.grid.width;
    let height = state.grid.height;
    let mut uprisings = 0;
    let mut revolts = 0;

    for y in 0..height {
        for x in 0..width {
            let pos = Position::new(x, y);
            if ctx.is_claimed(pos) {
                continue;
            }

            if try_revolt(state, ctx, pos) {
                revolts += 1;
                continue;
            }

            let resisted = ctx.resisted.at(pos).copied().unwrap_or(false);
            let decay_rule = state.rules.core_decay;
            let Some(cell) = state.grid.at_mut(pos) else {
                continue;
            };

            if cell.is_core {
                age_core(decay_rule, cell, resisted);
                continue;
            }

            if age_occupation(cell) {
                continue;
            }

            if state.rules.uprising == UprisingRule::Enabled && try_uprising(state, ctx, pos) {
                uprisings += 1;
            }
        }
    }

    ctx.uprisings += uprisings;
    ctx.revolts += revolts;
    (uprisings, revolts)
}

/// Roll for a revolt inside the post-capture window, then count the window down
fn try_revolt(state: &mut SimulationState, ctx: &mut TickContext, pos: Position) -> bool {
    let Some(cell) = state.grid.at(pos) else {
        return false;
    };
    if cell.revolt_timer == 0 {
        return false;
    }

    let window_tick = REVOLT_WINDOW.saturating_sub(cell.revolt_timer) as usize;
    let target = cell.revolt_target();

    if let (RevoltRule::Enabled, Some(original)) = (state.rules.revolt, target) {
        let supported = state
            .grid
            .neighbors8(pos.x, pos.y)
            .into_iter()
            .any(|n| state.grid.at(n).is_some_and(|c| c.owner == original));

        if supported {
            let chance = REVOLT_CHANCES[window_tick.min(REVOLT_CHANCES.len() - 1)];
            if state.rng().roll(chance) {
                if let Some(cell) = state.grid.at_mut(pos) {
                    cell.occupy(original);
                }
                ctx.claim(pos);
                ctx.events.push(EventType::Revolt {
                    x: pos.x,
                    y: pos.y,
                    faction: original,
                });
                tracing::trace!(
                    "Revolt at ({}, {}) returns it to {}",
                    pos.x,
                    pos.y,
                    original
                );
                return true;
            }
        }
    }

    if let Some(cell) = state.grid.at_mut(pos) {
        cell.revolt_timer -= 1;
        if cell.revolt_timer == 0 {
            cell.original_owner = None;
        }
    }
    false
}

/// Advance the core decay counter under the configured rule
fn age_core(rule: CoreDecayRule, cell: &mut Cell, resisted: bool) {
    let (after_ticks, restabilize) = match rule {
        CoreDecayRule::Permanent => return,
        CoreDecayRule::Decaying { after_ticks } => {
            cell.core_timer += 1;
            (after_ticks, false)
        }
        CoreDecayRule::Restabilizing { after_ticks } => {
            cell.core_timer += 1;
            (after_ticks, true)
        }
        CoreDecayRule::Besieged { after_ticks } => {
            if resisted {
                cell.core_timer += 1;
            }
            (after_ticks, false)
        }
    };

    if cell.core_timer >= after_ticks {
        cell.decay(restabilize);
    }
}

/// Age a non-core cell. Returns true when it stabilized into a core this tick.
fn age_occupation(cell: &mut Cell) -> bool {
    cell.occupation_age = cell.occupation_age.saturating_add(1);

    if cell.occupation_timer > 0 {
        cell.occupation_timer -= 1;
        if cell.occupation_timer == 0 {
            cell.stabilize();
            return true;
        }
    }
    false
}

/// Long-held non-core territory may rise up for its owner
///
/// The cell and every 4-neighbor its owner held at the start of the tick
/// return to that owner. Neighbors lost this tick are reoccupied, neighbors
/// still held shed their attrition.
fn try_uprising(state: &mut SimulationState, ctx: &mut TickContext, pos: Position) -> bool {
    let Some(cell) = state.grid.at(pos) else {
        return false;
    };
    if cell.occupation_age <= UPRISING_MIN_AGE {
        return false;
    }

    let index = ((cell.occupation_age - UPRISING_MIN_AGE - 1) as usize)
        .min(UPRISING_CHANCES.len() - 1);
    let owner = cell.owner;
    if !state.rng().roll(UPRISING_CHANCES[index]) {
        return false;
    }

    for n in state.grid.neighbors4(pos.x, pos.y) {
        if ctx.start_owner(n) != Some(owner) {
            continue;
        }
        let Some(neighbor) = state.grid.at_mut(n) else {
            continue;
        };
        if neighbor.owner != owner {
            neighbor.occupy(owner);
            ctx.claim(n);
        } else {
            neighbor.conquer_attempts = 0;
        }
    }

    if let Some(cell) = state.grid.at_mut(pos) {
        cell.occupation_age = 0;
        cell.conquer_attempts = 0;
    }

    ctx.events.push(EventType::Uprising {
        x: pos.x,
        y: pos.y,
        faction: owner,
    });
    tracing::trace!("Uprising at ({}, {}) for {}", pos.x, pos.y, owner);
    true
}
