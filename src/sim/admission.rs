//! Admission of chat users into the arena
//!
//! Turns one `(username, message)` event into at most one registry mutation:
//! spawn on first sighting, revive on `!revive`, otherwise nothing.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, Team};
use super::registry::Registry;
use crate::consts::REVIVE_COMMAND;
use crate::settings::ArenaConfig;

/// Spawn tuning for admissions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmissionParams {
    pub arena: Vec2,
    /// Per-axis bound for random spawn velocity
    pub max_spawn_speed: f32,
    pub max_name_len: usize,
}

impl From<&ArenaConfig> for AdmissionParams {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            arena: Vec2::new(config.width, config.height),
            max_spawn_speed: config.max_spawn_speed,
            max_name_len: config.max_name_len,
        }
    }
}

/// What an admission did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// New entity created for an unseen username
    Spawned,
    /// Existing entity brought back at revive health
    Revived,
    /// Known user, message has no effect
    Ignored,
    /// Username was not admitted (too long, or its slot already taken)
    Rejected,
}

impl Admission {
    pub fn changed_registry(self) -> bool {
        matches!(self, Admission::Spawned | Admission::Revived)
    }
}

/// Spawn a full-health entity with random team, position and velocity
pub fn spawn_entity<R: Rng>(name: &str, params: &AdmissionParams, rng: &mut R) -> Entity {
    let team = Team::ALL[rng.random_range(0..Team::ALL.len())];
    spawn_on_team(name, team, params, rng)
}

/// Spawn on a fixed team (roster bootstrap)
pub fn spawn_on_team<R: Rng>(
    name: &str,
    team: Team,
    params: &AdmissionParams,
    rng: &mut R,
) -> Entity {
    let pos = Vec2::new(
        rng.random_range(0.0..=params.arena.x),
        rng.random_range(0.0..=params.arena.y),
    );
    let speed = params.max_spawn_speed;
    let vel = Vec2::new(
        rng.random_range(-speed..=speed),
        rng.random_range(-speed..=speed),
    );
    Entity::new(name, team, pos, vel)
}

/// Apply one chat event to the registry
pub fn admit<R: Rng>(
    registry: &mut Registry,
    username: &str,
    message: &str,
    params: &AdmissionParams,
    rng: &mut R,
) -> Admission {
    if let Some(entity) = registry.lookup_mut(username) {
        if message == REVIVE_COMMAND {
            entity.revive();
            log::info!("{} revived ({} team)", entity.name(), entity.team.as_str());
            return Admission::Revived;
        }
        log::debug!("Ignoring message from {}", username);
        return Admission::Ignored;
    }

    if username.chars().count() > params.max_name_len {
        log::warn!(
            "Rejected username of {} chars (max {})",
            username.chars().count(),
            params.max_name_len
        );
        return Admission::Rejected;
    }

    let entity = spawn_entity(username, params, rng);
    let (team, pos) = (entity.team, entity.pos);
    // Unreachable: presence was checked above. A taken slot is a rejection.
    if let Err(err) = registry.insert(entity) {
        log::warn!("Rejected {}: {}", username, err);
        return Admission::Rejected;
    }
    log::info!(
        "{} joined the {} team at ({:.0}, {:.0})",
        username,
        team.as_str(),
        pos.x,
        pos.y
    );
    Admission::Spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> AdmissionParams {
        AdmissionParams {
            arena: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            max_spawn_speed: MAX_SPAWN_SPEED,
            max_name_len: MAX_NAME_LEN,
        }
    }

    #[test]
    fn test_spawn_on_first_sighting() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);

        let outcome = admit(&mut registry, "viewer", "hello", &params(), &mut rng);
        assert_eq!(outcome, Admission::Spawned);
        assert!(outcome.changed_registry());
        assert_eq!(registry.len(), 1);

        let e = registry.lookup("viewer").unwrap();
        assert_eq!(e.health, SPAWN_HEALTH);
        assert!(e.alive);
        assert_eq!(e.killed_by, None);
        assert!((0.0..=ARENA_WIDTH).contains(&e.pos.x));
        assert!((0.0..=ARENA_HEIGHT).contains(&e.pos.y));
        assert!(e.vel.x.abs() <= MAX_SPAWN_SPEED && e.vel.y.abs() <= MAX_SPAWN_SPEED);
    }

    #[test]
    fn test_dedup_same_username() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);

        admit(&mut registry, "viewer", "hi", &params(), &mut rng);
        let first = registry.lookup("viewer").unwrap().clone();
        let outcome = admit(&mut registry, "viewer", "hi again", &params(), &mut rng);

        assert_eq!(outcome, Admission::Ignored);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("viewer").unwrap(), &first);
    }

    #[test]
    fn test_revive_resets_state() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);
        admit(&mut registry, "viewer", "hi", &params(), &mut rng);
        {
            let e = registry.lookup_mut("viewer").unwrap();
            e.health = 0;
            e.kill("rival");
        }
        let team = registry.lookup("viewer").unwrap().team;

        let outcome = admit(&mut registry, "viewer", REVIVE_COMMAND, &params(), &mut rng);
        assert_eq!(outcome, Admission::Revived);

        let e = registry.lookup("viewer").unwrap();
        assert!(e.alive);
        assert_eq!(e.health, REVIVE_HEALTH);
        assert_eq!(e.killed_by, None);
        assert_eq!(e.name(), "viewer");
        assert_eq!(e.team, team);
    }

    #[test]
    fn test_revive_command_for_unknown_user_spawns() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let outcome = admit(&mut registry, "newbie", REVIVE_COMMAND, &params(), &mut rng);
        assert_eq!(outcome, Admission::Spawned);
        assert_eq!(registry.lookup("newbie").unwrap().health, SPAWN_HEALTH);
    }

    #[test]
    fn test_revive_only_touches_sender() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);
        for name in ["a", "b"] {
            admit(&mut registry, name, "hi", &params(), &mut rng);
            let e = registry.lookup_mut(name).unwrap();
            e.health = 0;
            e.kill("x");
        }
        admit(&mut registry, "a", REVIVE_COMMAND, &params(), &mut rng);
        assert!(registry.lookup("a").unwrap().alive);
        assert!(!registry.lookup("b").unwrap().alive);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut registry = Registry::new();
        let mut rng = Pcg32::seed_from_u64(7);

        let long = "x".repeat(MAX_NAME_LEN + 1);
        let outcome = admit(&mut registry, &long, "hi", &params(), &mut rng);
        assert_eq!(outcome, Admission::Rejected);
        assert!(registry.is_empty());

        let exact = "y".repeat(MAX_NAME_LEN);
        let outcome = admit(&mut registry, &exact, "hi", &params(), &mut rng);
        assert_eq!(outcome, Admission::Spawned);
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let mut a = Registry::new();
        let mut b = Registry::new();
        admit(&mut a, "viewer", "hi", &params(), &mut Pcg32::seed_from_u64(3));
        admit(&mut b, "viewer", "hi", &params(), &mut Pcg32::seed_from_u64(3));
        assert_eq!(a.lookup("viewer"), b.lookup("viewer"));
    }
}
