//! Identity allocator - hands out `<prefix>_<n>` IDs
//!
//! Tracks every ID in use across parts and wires. Part prefixes are capped at
//! a fixed number of live IDs; the wire prefix is unbounded.
//!
//! Allocation is two-phase: [`IdAllocator::allocate`] only searches for a free
//! candidate, and the caller commits it with [`IdAllocator::mark`]. Both steps
//! must happen under the same exclusive borrow (see `RegistryService`).

use std::collections::HashSet;

use crate::core::error::RegistryError;
use crate::core::identity::{EntityId, WIRE_PREFIX};

/// Maximum number of live IDs per part prefix
pub const DEFAULT_PART_LIMIT: usize = 50;

/// Set of used entity IDs plus the capacity policy
#[derive(Debug, Clone)]
pub struct IdAllocator {
    used: HashSet<EntityId>,
    part_limit: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_PART_LIMIT)
    }
}

impl IdAllocator {
    /// Create an empty allocator with the given per-prefix part limit
    pub fn new(part_limit: usize) -> Self {
        Self {
            used: HashSet::new(),
            part_limit,
        }
    }

    /// Sequence ceiling for a prefix, `None` when unbounded
    pub fn limit_for(&self, prefix: &str) -> Option<usize> {
        if prefix == WIRE_PREFIX {
            None
        } else {
            Some(self.part_limit)
        }
    }

    /// Find the lowest free `<prefix>_<n>` without marking it
    pub fn allocate(&self, prefix: &str) -> Result<EntityId, RegistryError> {
        match self.limit_for(prefix) {
            Some(limit) => (1..=limit)
                .map(|n| EntityId::compose(prefix, n))
                .find(|id| !self.used.contains(id))
                .ok_or_else(|| RegistryError::CapacityExceeded {
                    prefix: prefix.to_string(),
                    limit,
                }),
            // At most `used.len()` candidates can be taken, so this terminates
            None => Ok((1..)
                .map(|n| EntityId::compose(prefix, n))
                .find(|id| !self.used.contains(id))
                .unwrap_or_else(|| EntityId::compose(prefix, self.used.len() + 1))),
        }
    }

    /// Record an ID as used. Returns `false` if it already was.
    pub fn mark(&mut self, id: &EntityId) -> bool {
        self.used.insert(id.clone())
    }

    /// Remove an ID from the used set. Returns whether it was present.
    pub fn release(&mut self, id: &str) -> bool {
        self.used.remove(id)
    }

    /// Check whether an ID is in use
    pub fn is_used(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Number of used IDs sharing a prefix
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.used.iter().filter(|id| id.prefix() == prefix).count()
    }

    /// Total number of used IDs
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Iterate over all used IDs (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.used.iter()
    }
}
