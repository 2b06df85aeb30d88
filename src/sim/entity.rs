//! Arena participants and their render-facing view

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Team affiliation. Opaque to the core; colours belong to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Team {
    /// All teams in canonical order (roster assignment cycles through this)
    pub const ALL: [Team; 4] = [Team::Red, Team::Blue, Team::Green, Team::Yellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Green => "green",
            Team::Yellow => "yellow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Team::Red),
            "blue" => Some(Team::Blue),
            "green" => Some(Team::Green),
            "yellow" => Some(Team::Yellow),
            _ => None,
        }
    }

    /// Team for the `index`-th roster slot
    pub fn for_slot(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// One simulated participant
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique name (registry primary key). Fixed for the entity's lifetime.
    name: String,
    pub team: Team,
    /// Always within [0, MAX_HEALTH]
    pub health: u8,
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub alive: bool,
    /// Set on the alive -> dead transition, cleared on revive
    pub killed_by: Option<String>,
}

impl Entity {
    /// A freshly admitted, full-health entity
    pub fn new(name: impl Into<String>, team: Team, pos: Vec2, vel: Vec2) -> Self {
        Self {
            name: name.into(),
            team,
            health: SPAWN_HEALTH,
            pos,
            vel,
            alive: true,
            killed_by: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply a signed health change, clamped to [0, MAX_HEALTH]
    pub fn apply_health_delta(&mut self, delta: i8) {
        let next = i16::from(self.health) + i16::from(delta);
        self.health = next.clamp(0, i16::from(MAX_HEALTH)) as u8;
    }

    /// Transition to dead, recording the killer
    pub fn kill(&mut self, killer: &str) {
        self.alive = false;
        self.killed_by = Some(killer.to_string());
    }

    /// Bring the entity back at revive health
    pub fn revive(&mut self) {
        self.alive = true;
        self.health = REVIVE_HEALTH;
        self.killed_by = None;
    }

    /// Text a renderer shows on the entity's token
    pub fn status_label(&self) -> String {
        if self.alive {
            self.name.clone()
        } else {
            match &self.killed_by {
                Some(killer) => format!("Killed by {}", killer),
                None => "Killed".to_string(),
            }
        }
    }

    pub fn view(&self) -> EntityView {
        EntityView {
            name: self.name.clone(),
            team: self.team,
            health: self.health,
            x: self.pos.x,
            y: self.pos.y,
            alive: self.alive,
            killed_by: self.killed_by.clone(),
        }
    }
}

/// Read-only snapshot of one entity for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub name: String,
    pub team: Team,
    pub health: u8,
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub killed_by: Option<String>,
}
