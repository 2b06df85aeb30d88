//! Arena state and core simulation entry points
//!
//! The single state object the timer and the chat source both act on.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::admission::{Admission, AdmissionParams, admit, spawn_on_team};
use super::entity::{EntityView, Team};
use super::registry::Registry;
use super::step::{ArenaEvent, StepParams, step};
use crate::chat::ChatEvent;
use crate::consts::SIM_DT;
use crate::settings::{ArenaConfig, ConfigError};

/// Complete arena state (deterministic for a given seed and event order)
#[derive(Debug, Clone)]
pub struct ArenaState {
    pub config: ArenaConfig,
    pub registry: Registry,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Spawn randomness, seeded from the config
    rng: Pcg32,
}

impl ArenaState {
    /// Create a new arena and place the configured roster.
    ///
    /// The config is validated first; spawning into a degenerate arena is
    /// never attempted.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            registry: Registry::new(),
            time_ticks: 0,
            config,
        };
        state.spawn_roster();
        Ok(state)
    }

    fn spawn_roster(&mut self) {
        let params = AdmissionParams::from(&self.config);
        for (slot, name) in self.config.roster.iter().enumerate() {
            let entity = spawn_on_team(name, Team::for_slot(slot), &params, &mut self.rng);
            if let Err(err) = self.registry.insert(entity) {
                log::warn!("Skipping roster entry: {}", err);
            }
        }
        log::info!("Arena ready with {} entities", self.registry.len());
    }

    /// Advance one tick
    pub fn step(&mut self) -> Vec<ArenaEvent> {
        self.time_ticks += 1;
        let params = StepParams::from(&self.config);
        let events = step(&mut self.registry, &params, SIM_DT);
        log::debug!(
            "Tick {}: {} alive, {} kills",
            self.time_ticks,
            self.registry.alive_count(),
            events.len()
        );
        events
    }

    /// Apply one inbound chat event
    pub fn admit(&mut self, event: &ChatEvent) -> Admission {
        let params = AdmissionParams::from(&self.config);
        admit(
            &mut self.registry,
            event.username(),
            event.message(),
            &params,
            &mut self.rng,
        )
    }

    /// Render-facing view of every entity
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.registry.snapshot()
    }
}
