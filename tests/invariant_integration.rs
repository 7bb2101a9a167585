//! Multi-tick invariants over seeded games and probability-bound fuzzing

use std::collections::HashSet;

use proptest::prelude::*;

use frontline::core::config::SimulationConfig;
use frontline::core::types::{FactionId, Phase};
use frontline::rules::{attack_probability, AttackContext, CombatRule, CoreDecayRule, RuleSet};
use frontline::simulation::{EventType, Simulation};

fn game(factions: usize, size: usize, seed: u64, rules: RuleSet) -> Simulation {
    let config = SimulationConfig::default()
        .with_factions(factions)
        .with_grid_size(size)
        .with_seed(seed)
        .with_rules(rules);
    Simulation::new(config).unwrap()
}

fn core_decay_strategy() -> impl Strategy<Value = CoreDecayRule> {
    prop_oneof![
        Just(CoreDecayRule::Permanent),
        (1u32..30).prop_map(|after_ticks| CoreDecayRule::Decaying { after_ticks }),
        (1u32..30).prop_map(|after_ticks| CoreDecayRule::Restabilizing { after_ticks }),
        (1u32..10).prop_map(|after_ticks| CoreDecayRule::Besieged { after_ticks }),
    ]
}

fn attack_context_strategy() -> impl Strategy<Value = AttackContext> {
    (
        any::<bool>(),
        0u32..50,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(core, attempts, att_desp, def_desp, att_ally, def_ally, mutual, morale)| {
                AttackContext {
                    target_is_core: core,
                    failed_attempts: attempts,
                    attacker_desperate: att_desp,
                    defender_desperate: def_desp,
                    attacker_allied: att_ally,
                    defender_allied: def_ally,
                    mutual_alliance: mutual,
                    attacker_morale: morale,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn probability_always_in_unit_range(
        ctx in attack_context_strategy(),
        flat in -2.0f64..3.0,
    ) {
        for rule in [CombatRule::Weighted, CombatRule::Flat { chance: flat }] {
            let p = attack_probability(&rule, &ctx);
            prop_assert!((0.0..=1.0).contains(&p), "{:?} {:?} gave {}", rule, ctx, p);
        }
    }

    #[test]
    fn allied_pairs_never_succeed(ctx in attack_context_strategy()) {
        let ctx = AttackContext {
            mutual_alliance: true,
            ..ctx
        };
        prop_assert_eq!(attack_probability(&CombatRule::Weighted, &ctx), 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn cells_are_conserved_every_tick(
        factions in 2usize..=4,
        size in 4usize..=12,
        seed in any::<u64>(),
        decay in core_decay_strategy(),
        ticks in 1u64..40,
    ) {
        let rules = RuleSet {
            core_decay: decay,
            ..RuleSet::default()
        };
        let mut sim = game(factions, size, seed, rules);
        sim.start();

        for _ in 0..ticks {
            if sim.phase() != Phase::Running {
                break;
            }
            sim.tick().unwrap();
            let state = sim.state();
            prop_assert_eq!(state.factions.total_cells(), size * size);
            prop_assert_eq!(state.cell_counts().iter().sum::<usize>(), size * size);
            prop_assert!(state.check_invariants().is_ok(), "{:?}", state.check_invariants());
        }
    }

    #[test]
    fn alliances_stay_symmetric(
        factions in 3usize..=4,
        size in 6usize..=12,
        seed in any::<u64>(),
        ticks in 1u64..60,
    ) {
        let mut sim = game(factions, size, seed, RuleSet::default());
        sim.start();

        for _ in 0..ticks {
            sim.tick().unwrap();
            let registry = &sim.state().factions;
            prop_assert!(registry.alliances_consistent());
            let allied = registry.iter().filter(|f| f.is_allied()).count();
            prop_assert!(allied == 0 || allied == 2);
            for f in registry.iter() {
                if let Some(partner) = f.allied_with {
                    prop_assert!(registry.are_allied(partner, f.id));
                }
            }
        }
    }

    #[test]
    fn no_capture_between_allies(
        factions in 3usize..=4,
        size in 6usize..=12,
        seed in any::<u64>(),
        ticks in 1u64..60,
    ) {
        let mut sim = game(factions, size, seed, RuleSet::default());
        sim.start();

        for _ in 0..ticks {
            let allied_at_start = sim.state().factions.alliance();
            let report = sim.tick().unwrap();
            for event in &report.events {
                if let EventType::Capture {
                    attacker, defender, ..
                } = event.event_type
                {
                    prop_assert_ne!(attacker, defender);
                    if let Some((a, b)) = allied_at_start {
                        let pair: HashSet<FactionId> = [attacker, defender].into_iter().collect();
                        let allies: HashSet<FactionId> = [a, b].into_iter().collect();
                        prop_assert_ne!(pair, allies);
                    }
                }
            }
        }
    }

    #[test]
    fn no_core_within_six_ticks_of_a_change(
        factions in 2usize..=4,
        size in 4usize..=10,
        seed in any::<u64>(),
        ticks in 1u64..50,
    ) {
        let mut sim = game(factions, size, seed, RuleSet::default());
        sim.start();
        let mut previous = sim.snapshot();
        let mut last_change: Vec<Option<u64>> = vec![None; size * size];

        for _ in 0..ticks {
            if sim.phase() != Phase::Running {
                break;
            }
            let report = sim.tick().unwrap();
            let current = sim.snapshot();

            let pairs = previous.cells.iter().zip(current.cells.iter());
            for (i, (before, after)) in pairs.enumerate() {
                if before.owner != after.owner {
                    last_change[i] = Some(report.tick);
                }
                if let (true, Some(changed)) = (after.is_core, last_change[i]) {
                    prop_assert!(
                        report.tick - changed >= 6,
                        "cell ({}, {}) became core {} ticks after changing hands",
                        after.x,
                        after.y,
                        report.tick - changed
                    );
                }
            }
            previous = current;
        }
    }
}
