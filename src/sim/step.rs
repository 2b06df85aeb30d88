//! Fixed timestep simulation step
//!
//! Advances every alive entity by one tick: motion, wall reflection, then
//! pairwise proximity combat against the set of entities alive at the start
//! of the step.

use glam::Vec2;
use serde::Serialize;

use super::interaction::resolve_interactions;
use super::registry::Registry;
use crate::settings::ArenaConfig;

/// Geometry and combat tuning for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Arena extents (width, height); positions live in [0, extent]
    pub arena: Vec2,
    pub engagement_radius: f32,
}

impl From<&ArenaConfig> for StepParams {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            arena: Vec2::new(config.width, config.height),
            engagement_radius: config.engagement_radius,
        }
    }
}

/// Notable transitions produced by a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ArenaEvent {
    Killed { victim: String, killer: String },
}

/// Reflect one axis against [0, extent].
///
/// Reflection is decided on the unclamped projection, so a fast entity still
/// bounces at most once per step. Returns (clamped position, velocity).
#[inline]
pub fn reflect_axis(projected: f32, vel: f32, extent: f32) -> (f32, f32) {
    let vel = if projected <= 0.0 || projected >= extent {
        -vel
    } else {
        vel
    };
    (projected.clamp(0.0, extent), vel)
}

/// Advance the registry by one step of `dt` ticks
pub fn step(registry: &mut Registry, params: &StepParams, dt: f32) -> Vec<ArenaEvent> {
    let entities = registry.entities_mut();

    // Alive set is frozen here; deaths during this step don't shrink it
    let participants: Vec<usize> = entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .map(|(i, _)| i)
        .collect();

    for &i in &participants {
        let entity = &mut entities[i];
        let projected = entity.pos + entity.vel * dt;
        let (x, vx) = reflect_axis(projected.x, entity.vel.x, params.arena.x);
        let (y, vy) = reflect_axis(projected.y, entity.vel.y, params.arena.y);
        entity.pos = Vec2::new(x, y);
        entity.vel = Vec2::new(vx, vy);
    }

    let kills = resolve_interactions(entities, &participants, params.engagement_radius);

    let events: Vec<ArenaEvent> = kills
        .into_iter()
        .map(|(victim, killer)| ArenaEvent::Killed {
            victim: entities[victim].name().to_string(),
            killer: entities[killer].name().to_string(),
        })
        .collect();

    for event in &events {
        let ArenaEvent::Killed { victim, killer } = event;
        log::info!("{} was killed by {}", victim, killer);
    }

    events
}
