//! Entity registry - live parts and wires in insertion order

use serde::Serialize;

use crate::core::entity::{EntityHandle, EntityKind, VisualHandle};
use crate::core::error::RegistryError;
use crate::core::identity::extract_id;

/// Registry of live entities, split into parts and wires
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityRegistry {
    parts: Vec<EntityHandle>,
    wires: Vec<EntityHandle>,
}

/// Serializable copy of a registry, used for diagnostic dumps
pub type RegistrySnapshot = EntityRegistry;

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn collection_mut(&mut self, kind: &EntityKind) -> &mut Vec<EntityHandle> {
        if kind.is_wire() {
            &mut self.wires
        } else {
            &mut self.parts
        }
    }

    /// Append a handle to the collection matching its kind
    pub fn insert(&mut self, handle: EntityHandle) {
        self.collection_mut(&handle.kind).push(handle);
    }

    /// Remove the first handle of `kind` matching `predicate`
    pub fn remove_where<F>(&mut self, kind: &EntityKind, predicate: F) -> Option<EntityHandle>
    where
        F: Fn(&EntityHandle) -> bool,
    {
        let collection = self.collection_mut(kind);
        let index = collection.iter().position(predicate)?;
        Some(collection.remove(index))
    }

    /// Find an entity by ID, accepting free text containing an ID
    pub fn find_by_id(&self, query: &str) -> Result<&EntityHandle, RegistryError> {
        let id = extract_id(query).ok_or_else(|| RegistryError::EntityNotFound(query.to_string()))?;
        self.iter()
            .find(|h| h.id == id)
            .ok_or_else(|| RegistryError::EntityNotFound(query.to_string()))
    }

    /// Find an entity by exact ID for mutation
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut EntityHandle> {
        self.parts
            .iter_mut()
            .chain(self.wires.iter_mut())
            .find(|h| h.id == id)
    }

    /// Find the entity drawn by a visual
    pub fn find_by_visual(&self, visual: VisualHandle) -> Result<&EntityHandle, RegistryError> {
        self.iter()
            .find(|h| h.visual == Some(visual))
            .ok_or_else(|| RegistryError::EntityNotFound(visual.to_string()))
    }

    /// Parts in insertion order
    pub fn parts(&self) -> &[EntityHandle] {
        &self.parts
    }

    /// Wires in insertion order
    pub fn wires(&self) -> &[EntityHandle] {
        &self.wires
    }

    /// All handles, parts first
    pub fn iter(&self) -> impl Iterator<Item = &EntityHandle> {
        self.parts.iter().chain(self.wires.iter())
    }

    /// All handles, parts first, mutably
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityHandle> {
        self.parts.iter_mut().chain(self.wires.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.parts.len() + self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.wires.is_empty()
    }
}
