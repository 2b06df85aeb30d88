//! Pairwise proximity combat
//!
//! Every unordered pair of participants is evaluated exactly once against
//! positions frozen before any health changes, so the result does not depend
//! on which entity of a pair is visited first.

use glam::Vec2;

use super::entity::{Entity, Team};

/// Outcome of two participants being within engagement range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Same team: both regenerate
    Heal,
    /// Different teams: both take damage
    Damage,
}

impl Interaction {
    /// Classify a pair, or `None` if they are out of range
    pub fn between(a: (Vec2, Team), b: (Vec2, Team), radius: f32) -> Option<Self> {
        if a.0.distance(b.0) >= radius {
            return None;
        }
        Some(if a.1 == b.1 {
            Interaction::Heal
        } else {
            Interaction::Damage
        })
    }

    /// Health change applied to each side
    #[inline]
    pub fn health_delta(self) -> i8 {
        match self {
            Interaction::Heal => 1,
            Interaction::Damage => -1,
        }
    }
}

/// Resolve all pairwise interactions among `participants` (indices into
/// `entities`, in registry order).
///
/// Returns `(victim, killer)` index pairs for every entity whose health hit
/// zero, in the order the kills happened. An entity killed earlier in the
/// pass takes no further health changes but still affects its remaining
/// partners.
pub fn resolve_interactions(
    entities: &mut [Entity],
    participants: &[usize],
    radius: f32,
) -> Vec<(usize, usize)> {
    let frozen: Vec<(Vec2, Team)> = participants
        .iter()
        .map(|&i| (entities[i].pos, entities[i].team))
        .collect();

    let mut kills = Vec::new();

    for (slot_a, &a) in participants.iter().enumerate() {
        for (offset, &b) in participants[slot_a + 1..].iter().enumerate() {
            let slot_b = slot_a + 1 + offset;
            let Some(interaction) = Interaction::between(frozen[slot_a], frozen[slot_b], radius)
            else {
                continue;
            };
            let delta = interaction.health_delta();

            for (target, other) in [(a, b), (b, a)] {
                if !entities[target].alive {
                    continue;
                }
                entities[target].apply_health_delta(delta);
                if entities[target].health == 0 {
                    let killer = entities[other].name().to_string();
                    entities[target].kill(&killer);
                    kills.push((target, other));
                }
            }
        }
    }

    kills
}
