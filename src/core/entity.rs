//! Entity types - parts and wires placed on the schematic

use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, PartType, WIRE_PREFIX};

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "part", rename_all = "lowercase")]
pub enum EntityKind {
    Part(PartType),
    Wire,
}

impl EntityKind {
    /// ID prefix for entities of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Part(part) => part.prefix(),
            EntityKind::Wire => WIRE_PREFIX,
        }
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, EntityKind::Wire)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Part(part) => write!(f, "{}", part),
            EntityKind::Wire => write!(f, "wire"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wire" | "line" => Ok(EntityKind::Wire),
            _ => s.parse::<PartType>().map(EntityKind::Part),
        }
    }
}

/// Opaque reference to an entity's on-screen representation
///
/// The UI owns the visual; the registry only keeps this token to answer
/// "which entity is this shape?" lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualHandle(pub u64);

impl std::fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "visual#{}", self.0)
    }
}

/// One live circuit entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityHandle {
    /// Globally unique ID
    pub id: EntityId,

    /// Part or wire
    #[serde(flatten)]
    pub kind: EntityKind,

    /// IDs of topologically connected entities, in insertion order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<EntityId>,

    /// Back-reference to the on-screen representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual: Option<VisualHandle>,
}

impl EntityHandle {
    /// Whether this entity lists `id` among its connections
    pub fn is_connected_to(&self, id: &EntityId) -> bool {
        self.connections.iter().any(|c| c == id)
    }
}

/// A creation request coming from the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntity {
    pub kind: EntityKind,

    /// Caller-chosen ID; allocated from the kind's prefix when absent
    pub id: Option<String>,

    pub connections: Vec<String>,

    pub visual: Option<VisualHandle>,
}

impl NewEntity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            id: None,
            connections: Vec::new(),
            visual: None,
        }
    }

    /// Request a new part of the given type
    pub fn part(part: PartType) -> Self {
        Self::new(EntityKind::Part(part))
    }

    /// Request a new wire
    pub fn wire() -> Self {
        Self::new(EntityKind::Wire)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_connections<I, S>(mut self, connections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connections = connections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visual(mut self, visual: VisualHandle) -> Self {
        self.visual = Some(visual);
        self
    }
}
