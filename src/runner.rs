//! Fixed-period driver
//!
//! Owns the arena state and serializes every mutation onto one thread:
//! queued chat events are admitted in arrival order, then whole steps run
//! for the elapsed time. A step never starts while another is in progress
//! because both happen inside `advance`. Steps beyond the per-call catch-up
//! cap stay owed and run on later calls.

use std::collections::VecDeque;
use std::time::Duration;

use crate::chat::ChatEvent;
use crate::consts::MAX_CATCH_UP_STEPS;
use crate::scoreboard::Scoreboard;
use crate::settings::{ArenaConfig, ConfigError};
use crate::sim::{Admission, ArenaEvent, ArenaState};

/// What one call to [`ArenaRunner::advance`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Outcome of each admitted event, in arrival order
    pub admissions: Vec<Admission>,
    pub steps: u32,
    /// Whole periods still owed after hitting the catch-up cap
    pub deferred_steps: u64,
    pub events: Vec<ArenaEvent>,
}

#[derive(Debug)]
pub struct ArenaRunner {
    state: ArenaState,
    pending: VecDeque<ChatEvent>,
    accumulator: Duration,
    period: Duration,
    scoreboard: Scoreboard,
}

impl ArenaRunner {
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        let period = Duration::from_millis(config.tick_period_ms);
        Ok(Self {
            state: ArenaState::new(config)?,
            pending: VecDeque::new(),
            accumulator: Duration::ZERO,
            period,
            scoreboard: Scoreboard::new(),
        })
    }

    /// Queue a chat event; it is admitted on the next `advance`
    pub fn submit(&mut self, event: ChatEvent) {
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Admit queued events, then run the steps owed for `elapsed`
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceReport {
        let mut report = AdvanceReport::default();

        while let Some(event) = self.pending.pop_front() {
            report.admissions.push(self.state.admit(&event));
        }
        if report.admissions.iter().any(|a| a.changed_registry()) {
            log::debug!(
                "Registry now holds {} entities ({} alive)",
                self.state.registry.len(),
                self.state.registry.alive_count()
            );
        }

        self.accumulator += elapsed;
        while self.accumulator >= self.period && report.steps < MAX_CATCH_UP_STEPS {
            let events = self.state.step();
            self.scoreboard.record_all(&events);
            report.events.extend(events);
            self.accumulator -= self.period;
            report.steps += 1;
        }

        // Backlog stays in the accumulator for the next call
        if self.accumulator >= self.period {
            let owed = (self.accumulator.as_nanos() / self.period.as_nanos()) as u64;
            report.deferred_steps = owed;
            log::warn!("Simulation behind by {} steps, deferring", owed);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ArenaMode;

    fn chat_runner() -> ArenaRunner {
        ArenaRunner::new(ArenaConfig::from_mode(ArenaMode::Chat)).unwrap()
    }

    #[test]
    fn test_steps_follow_period() {
        let mut runner = chat_runner();
        assert_eq!(runner.advance(Duration::from_millis(49)).steps, 0);
        assert_eq!(runner.advance(Duration::from_millis(1)).steps, 1);
        assert_eq!(runner.advance(Duration::from_millis(120)).steps, 2);
        assert_eq!(runner.state().time_ticks, 3);
    }

    #[test]
    fn test_events_admitted_in_order_before_steps() {
        let mut runner = chat_runner();
        runner.submit(ChatEvent::new("amy", "hi").unwrap());
        runner.submit(ChatEvent::new("amy", "!revive").unwrap());
        runner.submit(ChatEvent::new("amy", "hello").unwrap());
        assert_eq!(runner.pending(), 3);

        let report = runner.advance(Duration::ZERO);
        assert_eq!(
            report.admissions,
            [Admission::Spawned, Admission::Revived, Admission::Ignored]
        );
        assert_eq!(report.steps, 0);
        assert_eq!(runner.pending(), 0);
        // Revive right after spawn resets health to 50
        assert_eq!(runner.state().registry.lookup("amy").unwrap().health, 50);
    }

    #[test]
    fn test_backlog_is_deferred_not_dropped() {
        let mut runner = chat_runner();
        let report = runner.advance(runner.period() * 20 + Duration::from_millis(10));
        assert_eq!(report.steps, MAX_CATCH_UP_STEPS);
        assert_eq!(report.deferred_steps, 12);

        // The owed steps run on later calls, capped each time
        let report = runner.advance(Duration::ZERO);
        assert_eq!((report.steps, report.deferred_steps), (8, 4));
        let report = runner.advance(Duration::from_millis(40));
        assert_eq!((report.steps, report.deferred_steps), (5, 0));
        assert_eq!(runner.state().time_ticks, 21);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ArenaConfig::from_mode(ArenaMode::Chat);
        config.tick_period_ms = 0;
        assert!(matches!(ArenaRunner::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_scoreboard_tracks_kills() {
        let mut config = ArenaConfig::from_mode(ArenaMode::Chat);
        config.roster = vec!["red".into(), "blue".into()];
        let mut runner = ArenaRunner::new(config).unwrap();
        // Force a guaranteed fight
        for (name, x) in [("red", 100.0), ("blue", 105.0)] {
            let e = runner.state.registry.lookup_mut(name).unwrap();
            e.pos = glam::Vec2::new(x, 100.0);
            e.vel = glam::Vec2::ZERO;
            e.health = 1;
        }

        let report = runner.advance(runner.period());
        assert_eq!(report.events.len(), 2);
        assert_eq!(runner.scoreboard().get("red").unwrap().kills, 1);
        assert_eq!(runner.scoreboard().get("blue").unwrap().deaths, 1);
    }
}
