//! Entity registry
//!
//! Authoritative, insertion-ordered collection of every entity ever admitted.
//! Names are unique and entities are never removed: death is a flag.

use std::collections::HashMap;

use thiserror::Error;

use super::entity::{Entity, EntityView};

/// Errors raised by registry mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("an entity named {0:?} is already registered")]
    DuplicateName(String),
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Insertion order is iteration order
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.index.get(name).map(|&i| &mut self.entities[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Append an entity. Fails only if the name is taken.
    pub fn insert(&mut self, entity: Entity) -> Result<(), RegistryError> {
        if self.index.contains_key(entity.name()) {
            return Err(RegistryError::DuplicateName(entity.name().to_string()));
        }
        self.index.insert(entity.name().to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// All entities in insertion order
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access for the step engine. Slots can change state but not
    /// identity, so the name index stays valid.
    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.entities.iter().filter(|e| e.alive).count()
    }

    /// Render-facing snapshot in insertion order
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.entities.iter().map(Entity::view).collect()
    }
}
