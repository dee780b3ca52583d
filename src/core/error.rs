//! Errors raised by identity allocation and the entity registry

use thiserror::Error;

use crate::core::identity::IdParseError;

/// Errors related to entity lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No free ID for prefix '{prefix}': all {limit} slots are in use")]
    CapacityExceeded { prefix: String, limit: usize },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity ID already in use: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    InvalidId(#[from] IdParseError),

    #[error("Entity {0} cannot be connected to itself")]
    SelfConnection(String),
}
