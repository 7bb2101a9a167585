//! Scripted-draw scenarios with exact expected outcomes

use frontline::core::config::SimulationConfig;
use frontline::core::rng::SequenceRng;
use frontline::core::types::{FactionId, Phase};
use frontline::faction::FactionRegistry;
use frontline::rules::{CombatRule, RuleSet};
use frontline::simulation::systems::{
    dominance_alliance, update_alliances, update_dynamics, TickContext,
};
use frontline::simulation::{EventType, Simulation, SimulationState};
use frontline::territory::{Cell, Grid};

fn capture(x: usize, y: usize, attacker: u8, defender: u8) -> EventType {
    EventType::Capture {
        x,
        y,
        attacker: FactionId(attacker),
        defender: FactionId(defender),
    }
}

#[test]
fn test_four_by_four_first_tick() {
    // Border pairs are resolved row by row, left cell attacking first
    let draws = vec![0.1, 0.9, 0.3, 0.2, 0.24, 0.26, 0.99, 0.0];
    let config = SimulationConfig::default().with_factions(2).with_grid_size(4);
    let mut sim = Simulation::with_rng(config, Box::new(SequenceRng::new(draws))).unwrap();
    sim.start();

    let report = sim.tick().unwrap();

    let events: Vec<EventType> = report
        .events
        .iter()
        .map(|e| e.event_type.clone())
        .collect();
    assert_eq!(
        events,
        vec![
            capture(2, 0, 0, 1),
            capture(1, 1, 1, 0),
            capture(2, 2, 0, 1),
            capture(1, 3, 1, 0)
        ]
    );
    assert_eq!(report.captures, 4);
    assert_eq!(report.phase, Phase::Running);

    let snapshot = sim.snapshot();
    let owners: Vec<Vec<u8>> = (0..4)
        .map(|y| (0..4).map(|x| snapshot.owner_at(x, y).unwrap().0).collect())
        .collect();
    assert_eq!(
        owners,
        vec![
            vec![0, 0, 0, 1],
            vec![0, 1, 1, 1],
            vec![0, 0, 0, 1],
            vec![0, 1, 1, 1]
        ]
    );

    let state = sim.state();
    for (x, y) in [(1, 0), (2, 1), (1, 2), (2, 3)] {
        let attempts = state.grid.get(x, y).unwrap().conquer_attempts;
        assert_eq!(attempts, 1, "({}, {})", x, y);
    }
    let captured = state.grid.get(2, 0).unwrap();
    assert!(!captured.is_core);
    assert_eq!(captured.occupation_timer, 6);
    assert_eq!(captured.revolt_timer, 3);

    for faction in state.factions.iter() {
        assert_eq!(faction.cell_count, 8);
        assert_eq!(faction.core_count, 6);
        // 6 of 8 is exactly three quarters, not below it
        assert!(!faction.desperate_defense);
    }
}

#[test]
fn test_morale_boost_lifecycle() {
    // Faction 0 starts with 100 of the 225 cores, then loses 26 of them
    let grid = Grid::from_fn(15, 15, |x, y| {
        Cell::core(FactionId(u8::from(y * 15 + x >= 100)))
    });
    let mut state = SimulationState::from_grid(
        grid,
        2,
        RuleSet::default(),
        Box::new(SequenceRng::new(vec![])),
    )
    .unwrap();
    assert_eq!(state.factions.get(FactionId(0)).unwrap().initial_cores, 100);

    let lost: Vec<(usize, usize)> = (0..26).map(|i| (i % 15, i / 15)).collect();
    for &(x, y) in &lost {
        let cell = state.grid.get_mut(x, y).unwrap();
        cell.is_core = false;
        cell.occupation_timer = 6;
    }

    let mut ctx = TickContext::begin(&state.grid);
    update_dynamics(&mut state, &mut ctx);

    let red = state.factions.get(FactionId(0)).unwrap();
    assert_eq!(red.core_count, 74);
    assert!(red.desperate_defense);
    assert_eq!(red.morale_boost, 10);
    assert_eq!(
        ctx.events,
        vec![EventType::MoraleBoostGained {
            faction: FactionId(0)
        }]
    );

    // Still below the threshold: refreshed, but no second event
    let mut ctx = TickContext::begin(&state.grid);
    update_dynamics(&mut state, &mut ctx);
    assert_eq!(state.factions.get(FactionId(0)).unwrap().morale_boost, 10);
    assert!(ctx.events.is_empty());

    for &(x, y) in &lost {
        let cell = state.grid.get_mut(x, y).unwrap();
        cell.is_core = true;
        cell.occupation_timer = 0;
    }

    for tick in 1..=10 {
        let mut ctx = TickContext::begin(&state.grid);
        update_dynamics(&mut state, &mut ctx);
        let red = state.factions.get(FactionId(0)).unwrap();
        assert_eq!(red.morale_boost, 10 - tick);
        assert_eq!(red.desperate_defense, tick < 10);
    }
}

fn ranked_grid(cores: [usize; 3], non_core_in_last: usize) -> Grid<Cell> {
    let total: usize = cores.iter().sum();
    Grid::from_fn(10, total / 10, |x, y| {
        let i = y * 10 + x;
        let owner = if i < cores[0] {
            0
        } else if i < cores[0] + cores[1] {
            1
        } else {
            2
        };
        let mut cell = Cell::core(FactionId(owner));
        if owner == 2 && i >= total - non_core_in_last {
            cell.occupy(FactionId(2));
        }
        cell
    })
}

#[test]
fn test_two_weakest_ally_against_dominant_faction() {
    let grid = ranked_grid([10, 20, 70], 0);
    let registry = FactionRegistry::from_grid(3, &grid);
    assert_eq!(
        dominance_alliance(&registry),
        Some((FactionId(0), FactionId(1)))
    );

    let mut state = SimulationState::from_grid(
        grid,
        3,
        RuleSet::default(),
        Box::new(SequenceRng::new(vec![])),
    )
    .unwrap();
    let mut ctx = TickContext::begin(&state.grid);
    update_alliances(&mut state, &mut ctx);

    assert!(state.factions.are_allied(FactionId(0), FactionId(1)));
    assert!(state.factions.are_allied(FactionId(1), FactionId(0)));
    assert!(!state.factions.is_allied(FactionId(2)));
    assert_eq!(
        ctx.events,
        vec![EventType::AllianceFormed {
            members: (FactionId(0), FactionId(1))
        }]
    );
}

#[test]
fn test_no_alliance_at_or_below_combined_strength() {
    // Strongest exactly equal to the other two
    let registry = FactionRegistry::from_grid(3, &ranked_grid([10, 20, 30], 0));
    assert_eq!(dominance_alliance(&registry), None);

    // One of the strongest faction's cells is not a core: 29 cores
    let registry = FactionRegistry::from_grid(3, &ranked_grid([10, 20, 30], 1));
    assert_eq!(registry.get(FactionId(2)).unwrap().core_count, 29);
    assert_eq!(dominance_alliance(&registry), None);
}

#[test]
fn test_flat_rule_uses_constant_chance() {
    // 0.49 beats a flat 0.5 even against cores; 0.51 does not
    let rules = RuleSet {
        combat: CombatRule::flat(),
        ..RuleSet::default()
    };
    let config = SimulationConfig::default().with_grid_size(2).with_rules(rules);
    let draws = SequenceRng::new(vec![0.49, 0.51, 0.51, 0.51]);
    let mut sim = Simulation::with_rng(config, Box::new(draws)).unwrap();
    sim.start();

    let report = sim.tick().unwrap();

    assert_eq!(report.captures, 1);
    assert_eq!(sim.snapshot().owner_at(1, 0), Some(FactionId(0)));
}
