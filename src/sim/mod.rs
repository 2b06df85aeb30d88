//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected (seeded) RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or transport dependencies

pub mod admission;
pub mod entity;
pub mod interaction;
pub mod registry;
pub mod state;
pub mod step;

pub use admission::{Admission, AdmissionParams, admit, spawn_entity, spawn_on_team};
pub use entity::{Entity, EntityView, Team};
pub use interaction::{Interaction, resolve_interactions};
pub use registry::{Registry, RegistryError};
pub use state::ArenaState;
pub use step::{ArenaEvent, StepParams, reflect_axis, step};
