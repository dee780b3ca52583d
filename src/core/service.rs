//! Entity lifecycle controller
//!
//! `RegistryService` owns the used-ID set and the entity registry for one
//! diagram. Every mutation (create, rename, rewire, destroy) holds the write
//! lock for its whole duration, so the two structures always change together
//! and concurrent callers observe them in lock-step. Lookups share the read
//! lock.

use parking_lot::RwLock;

use crate::core::allocator::{IdAllocator, DEFAULT_PART_LIMIT};
use crate::core::entity::{EntityHandle, EntityKind, NewEntity, VisualHandle};
use crate::core::error::RegistryError;
use crate::core::identity::EntityId;
use crate::core::registry::{EntityRegistry, RegistrySnapshot};

#[derive(Debug, Default)]
struct Diagram {
    ids: IdAllocator,
    entities: EntityRegistry,
}

/// Identity and registry state for a single diagram
#[derive(Debug)]
pub struct RegistryService {
    state: RwLock<Diagram>,
}

impl Default for RegistryService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_connections(owner: &EntityId, raw: &[String]) -> Result<Vec<EntityId>, RegistryError> {
    let connections = raw
        .iter()
        .map(|c| c.parse::<EntityId>())
        .collect::<Result<Vec<_>, _>>()?;
    if connections.iter().any(|c| c == owner) {
        return Err(RegistryError::SelfConnection(owner.to_string()));
    }
    Ok(connections)
}

/// Fail when `prefix` already has as many live IDs as its limit allows
fn check_capacity(ids: &IdAllocator, prefix: &str) -> Result<(), RegistryError> {
    match ids.limit_for(prefix) {
        Some(limit) if ids.count_with_prefix(prefix) >= limit => {
            let err = RegistryError::CapacityExceeded {
                prefix: prefix.to_string(),
                limit,
            };
            log::warn!("{}", err);
            Err(err)
        }
        _ => Ok(()),
    }
}

impl RegistryService {
    /// Create an empty diagram with the default part limit
    pub fn new() -> Self {
        Self::with_part_limit(DEFAULT_PART_LIMIT)
    }

    /// Create an empty diagram allowing `part_limit` live parts per prefix
    pub fn with_part_limit(part_limit: usize) -> Self {
        Self {
            state: RwLock::new(Diagram {
                ids: IdAllocator::new(part_limit),
                entities: EntityRegistry::new(),
            }),
        }
    }

    /// Create and register an entity
    ///
    /// Uses the requested ID when given, otherwise allocates the lowest free
    /// `<prefix>_<n>` for the entity's kind. Nothing is mutated on failure.
    pub fn create_entity(&self, request: NewEntity) -> Result<EntityHandle, RegistryError> {
        let mut state = self.state.write();

        let id = match request.id.as_deref().filter(|s| !s.is_empty()) {
            Some(requested) => {
                let id: EntityId = requested.parse()?;
                if state.ids.is_used(id.as_str()) {
                    return Err(RegistryError::DuplicateId(id.to_string()));
                }
                check_capacity(&state.ids, id.prefix())?;
                id
            }
            None => {
                let prefix = request.kind.prefix();
                check_capacity(&state.ids, prefix)?;
                state.ids.allocate(prefix).inspect_err(|e| log::warn!("{}", e))?
            }
        };

        let handle = EntityHandle {
            connections: parse_connections(&id, &request.connections)?,
            id,
            kind: request.kind,
            visual: request.visual,
        };

        state.ids.mark(&handle.id);
        state.entities.insert(handle.clone());
        log::debug!("created {} ({})", handle.id, handle.kind);
        Ok(handle)
    }

    /// Give an entity a new ID, updating `handle` in place
    ///
    /// The new ID is marked before the old one is released, so the entity is
    /// never without an ID. References held in other entities' connections
    /// follow the rename.
    pub fn rename_entity(&self, handle: &mut EntityHandle, new_id: &str) -> Result<(), RegistryError> {
        let new_id: EntityId = new_id.parse()?;
        let old_id = handle.id.clone();

        let mut state = self.state.write();
        if state.entities.get_mut(old_id.as_str()).is_none() {
            return Err(RegistryError::EntityNotFound(old_id.to_string()));
        }
        if new_id == old_id {
            return Ok(());
        }
        if state.ids.is_used(new_id.as_str()) {
            return Err(RegistryError::DuplicateId(new_id.to_string()));
        }
        if new_id.prefix() != old_id.prefix() {
            check_capacity(&state.ids, new_id.prefix())?;
        }

        state.ids.mark(&new_id);
        state.ids.release(old_id.as_str());

        if let Some(entity) = state.entities.get_mut(old_id.as_str()) {
            entity.id = new_id.clone();
        }
        for peer in state
            .entities
            .iter_mut()
            .filter(|h| h.is_connected_to(&old_id))
        {
            for connection in peer.connections.iter_mut().filter(|c| **c == old_id) {
                *connection = new_id.clone();
            }
        }

        log::debug!("renamed {} -> {}", old_id, new_id);
        handle.id = new_id;
        Ok(())
    }

    /// Replace an entity's connection list
    pub fn rewire(&self, id: &str, connections: &[String]) -> Result<EntityHandle, RegistryError> {
        let mut state = self.state.write();
        let entity = state
            .entities
            .get_mut(id)
            .ok_or_else(|| RegistryError::EntityNotFound(id.to_string()))?;
        entity.connections = parse_connections(&entity.id, connections)?;
        log::debug!("rewired {} to {} connection(s)", entity.id, entity.connections.len());
        Ok(entity.clone())
    }

    /// Attach or replace the visual back-reference of an entity
    pub fn bind_visual(&self, id: &str, visual: VisualHandle) -> Result<EntityHandle, RegistryError> {
        let mut state = self.state.write();
        let entity = state
            .entities
            .get_mut(id)
            .ok_or_else(|| RegistryError::EntityNotFound(id.to_string()))?;
        entity.visual = Some(visual);
        Ok(entity.clone())
    }

    /// Release an entity's ID and drop it from the registry
    pub fn destroy_entity(&self, handle: &EntityHandle) -> Result<EntityHandle, RegistryError> {
        let mut state = self.state.write();
        Self::destroy_locked(&mut state, &handle.kind, &handle.id)
    }

    /// Destroy the entity an ID query resolves to
    pub fn destroy_by_id(&self, query: &str) -> Result<EntityHandle, RegistryError> {
        let mut state = self.state.write();
        let (kind, id) = {
            let found = state.entities.find_by_id(query)?;
            (found.kind, found.id.clone())
        };
        Self::destroy_locked(&mut state, &kind, &id)
    }

    fn destroy_locked(
        state: &mut Diagram,
        kind: &EntityKind,
        id: &EntityId,
    ) -> Result<EntityHandle, RegistryError> {
        let removed = state
            .entities
            .remove_where(kind, |h| h.id == *id)
            .ok_or_else(|| RegistryError::EntityNotFound(id.to_string()))?;
        state.ids.release(id.as_str());

        for peer in state.entities.iter_mut().filter(|h| h.is_connected_to(id)) {
            peer.connections.retain(|c| c != id);
        }

        log::debug!("destroyed {}", id);
        Ok(removed)
    }

    /// Look up an entity by ID or by free text containing one
    pub fn find_by_id(&self, query: &str) -> Result<EntityHandle, RegistryError> {
        self.state.read().entities.find_by_id(query).cloned()
    }

    /// Look up the entity drawn by a visual
    pub fn find_by_visual(&self, visual: VisualHandle) -> Result<EntityHandle, RegistryError> {
        self.state.read().entities.find_by_visual(visual).cloned()
    }

    /// Check whether an ID is currently in use
    pub fn is_used(&self, id: &str) -> bool {
        self.state.read().ids.is_used(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.state.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entities.is_empty()
    }

    /// Copy of the registry in insertion order
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.state.read().entities.clone()
    }

    /// Check that the used-ID set and the registry agree
    pub fn is_consistent(&self) -> bool {
        let state = self.state.read();
        state.entities.iter().all(|h| state.ids.is_used(h.id.as_str()))
            && state
                .ids
                .iter()
                .all(|id| state.entities.find_by_id(id.as_str()).is_ok())
    }
}
