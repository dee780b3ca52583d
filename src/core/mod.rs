//! Core module - identity, registry, and numeric codec

pub mod allocator;
pub mod config;
pub mod entity;
pub mod error;
pub mod identity;
pub mod numeric;
pub mod registry;
pub mod service;

pub use allocator::{IdAllocator, DEFAULT_PART_LIMIT};
pub use config::{Config, ConfigError};
pub use entity::{EntityHandle, EntityKind, NewEntity, VisualHandle};
pub use error::RegistryError;
pub use identity::{extract_id, EntityId, IdParseError, PartType, WIRE_PREFIX};
pub use numeric::{NumericError, SelectOption, Suffix};
pub use registry::{EntityRegistry, RegistrySnapshot};
pub use service::RegistryService;
