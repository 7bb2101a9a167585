//! Simulation clock - drives the per-tick phases and owns the run lifecycle

use std::time::Duration;

use crate::core::config::{tick_interval_for, SimulationConfig};
use crate::core::error::{ConfigError, FrontlineError, Result};
use crate::core::rng::{default_source, RandomSource};
use crate::core::types::{FactionId, Phase, Tick};
use crate::simulation::events::{Event, EventLog, EventType};
use crate::simulation::snapshot::{Snapshot, SnapshotSink};
use crate::simulation::state::SimulationState;
use crate::simulation::systems::{self, TickContext};

/// What one tick produced
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub events: Vec<Event>,
    pub captures: usize,
    pub uprisings: usize,
    pub revolts: usize,
    /// Phase after the tick
    pub phase: Phase,
}

/// A game: state plus the Idle -> Running -> Ended lifecycle
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    phase: Phase,
    history: EventLog,
    winner: Option<FactionId>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let state = SimulationState::new(&config)?;
        Ok(Self::from_state(config, state))
    }

    /// Game drawing from `rng` instead of the configured seed
    ///
    /// The source is consumed by this game only. [`Simulation::restart`] goes
    /// back to the configured seed; use [`Simulation::restart_with_rng`] to
    /// replay with another injected source.
    pub fn with_rng(config: SimulationConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        let state = SimulationState::with_rng(&config, rng)?;
        Ok(Self::from_state(config, state))
    }

    /// Wrap a prepared state, e.g. a hand-built grid
    pub fn from_state(config: SimulationConfig, state: SimulationState) -> Self {
        let history = EventLog::with_capacity(config.event_log_capacity);
        Self {
            config,
            state,
            phase: Phase::Idle,
            history,
            winner: None,
        }
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            tracing::info!(
                "Starting {}-faction game on a {}x{} grid",
                self.state.factions.len(),
                self.state.grid_size(),
                self.state.grid_size()
            );
        }
    }

    /// Advance one tick: combat, stabilization, dynamics, victory
    pub fn tick(&mut self) -> Result<TickReport> {
        if self.phase != Phase::Running {
            tracing::warn!("Refusing to tick while {:?}", self.phase);
            return Err(FrontlineError::InvariantViolation(format!(
                "tick requested while {:?}",
                self.phase
            )));
        }

        self.state.tick += 1;
        let tick = self.state.tick;
        let mut ctx = TickContext::begin(&self.state.grid);

        systems::resolve_combat(&mut self.state, &mut ctx);
        systems::advance_stabilization(&mut self.state, &mut ctx);
        systems::update_dynamics(&mut self.state, &mut ctx);

        if let Some(winner) = systems::check_victory(&self.state, &mut ctx) {
            self.winner = Some(winner);
            self.phase = Phase::Ended;
        }

        debug_assert!(
            self.state.check_invariants().is_ok(),
            "invariant broken after tick {}: {:?}",
            tick,
            self.state.check_invariants()
        );

        tracing::debug!(
            "Tick {}: {} captures, {} uprisings, {} revolts",
            tick,
            ctx.captures,
            ctx.uprisings,
            ctx.revolts
        );

        let events = ctx
            .events
            .into_iter()
            .map(|event_type| self.history.add_event(event_type, tick))
            .collect();

        Ok(TickReport {
            tick,
            events,
            captures: ctx.captures,
            uprisings: ctx.uprisings,
            revolts: ctx.revolts,
            phase: self.phase,
        })
    }

    /// Start if idle, then tick until the game ends or `max_ticks` pass
    pub fn run_until_ended(&mut self, max_ticks: u64) -> Result<Option<FactionId>> {
        self.start();
        let mut ran = 0;
        while self.phase == Phase::Running && ran < max_ticks {
            self.tick()?;
            ran += 1;
        }
        Ok(self.winner)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.phase)
    }

    /// Hand the current snapshot and a tick's events to a presentation sink
    pub fn publish(&self, sink: &mut dyn SnapshotSink, report: &TickReport) {
        sink.publish(&self.snapshot(), &report.events);
    }

    /// Fresh state from the stored config, back to Idle
    ///
    /// Draws restart from `config.seed`, or from entropy when unseeded, even
    /// if the game was built with an injected source.
    pub fn restart(&mut self) -> Result<()> {
        self.restart_with_rng(default_source(self.config.seed))
    }

    /// Fresh state from the stored config drawing from `rng`, back to Idle
    pub fn restart_with_rng(&mut self, rng: Box<dyn RandomSource>) -> Result<()> {
        self.state = SimulationState::with_rng(&self.config, rng)?;
        self.phase = Phase::Idle;
        self.winner = None;
        self.history = EventLog::with_capacity(self.config.event_log_capacity);
        tracing::info!("Game restarted");
        Ok(())
    }

    pub fn set_speed(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidSpeed(multiplier).into());
        }
        self.config.speed_multiplier = multiplier;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        tick_interval_for(self.config.speed_multiplier)
    }

    /// Ally two factions now. The automatic rule may dissolve the pair on the next tick.
    pub fn force_alliance(&mut self, a: FactionId, b: FactionId) -> Result<()> {
        let before = self.state.factions.alliance();
        self.state.factions.set_alliance(a, b)?;
        self.state.forced_alliance = Some((a, b));
        self.config.forced_alliance = Some((a, b));

        let members = (a.min(b), a.max(b));
        if before != Some(members) {
            if let Some(old) = before {
                self.history.add_event(
                    EventType::AllianceDissolved { members: old },
                    self.state.tick,
                );
            }
            self.history.add_event(EventType::AllianceFormed { members }, self.state.tick);
            tracing::info!("{} and {} forced into an alliance", a, b);
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<FactionId> {
        self.winner
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn history(&self) -> &EventLog {
        &self.history
    }
}
