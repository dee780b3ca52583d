//! Entity identity - typed IDs and the part catalog
//!
//! Identifiers have the form `<prefix>_<sequence>`, e.g. `R_1` or `line_12`.
//! The format `^[a-zA-Z]+_[a-zA-Z0-9]+$` is a stable contract: parameter
//! dialogs and other callers extract IDs from larger strings with it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix shared by every wire ID
pub const WIRE_PREFIX: &str = "line";

static ID_EXACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+_[a-zA-Z0-9]+$").unwrap());

static ID_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]+_[a-zA-Z0-9]+").unwrap());

/// Errors that can occur when parsing an entity ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("Empty entity ID")]
    Empty,

    #[error("Malformed entity ID {0:?}: expected <letters>_<alphanumerics>")]
    Malformed(String),
}

/// A unique, human-readable entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Build the ID for sequence number `n` under `prefix`
    ///
    /// `prefix` must be purely alphabetic; catalog prefixes and
    /// [`WIRE_PREFIX`] always are.
    pub fn compose(prefix: &str, n: usize) -> Self {
        Self(format!("{}_{}", prefix, n))
    }

    /// The type-derived part before the underscore
    pub fn prefix(&self) -> &str {
        self.0.split_once('_').map(|(p, _)| p).unwrap_or(&self.0)
    }

    /// The sequence part after the underscore
    pub fn sequence(&self) -> &str {
        self.0.split_once('_').map(|(_, s)| s).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ID belongs to a wire
    pub fn is_wire(&self) -> bool {
        self.prefix() == WIRE_PREFIX
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError::Empty);
        }
        if !ID_EXACT.is_match(s) {
            return Err(IdParseError::Malformed(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Extract an entity ID from free text
///
/// Exact IDs pass through. Otherwise the first `<letters>_<alphanumerics>`
/// token is taken, so legacy callers can hand over things like a DOM query
/// (`#R_3 > path`) instead of a bare ID.
pub fn extract_id(text: &str) -> Option<EntityId> {
    let text = text.trim();
    if ID_EXACT.is_match(text) {
        return Some(EntityId(text.to_string()));
    }
    ID_TOKEN
        .find(text)
        .map(|m| EntityId(m.as_str().to_string()))
}

/// Closed catalog of part types that can be placed on a schematic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartType {
    Resistor,
    Capacitor,
    Inductor,
    DcVoltageSource,
    AcVoltageSource,
    CurrentSource,
    Diode,
    Transistor,
    Ammeter,
    Voltmeter,
    Ground,
}

impl PartType {
    /// ID prefix for this part type
    pub fn prefix(self) -> &'static str {
        match self {
            PartType::Resistor => "R",
            PartType::Capacitor => "C",
            PartType::Inductor => "L",
            PartType::DcVoltageSource => "V",
            PartType::AcVoltageSource => "VAC",
            PartType::CurrentSource => "I",
            PartType::Diode => "D",
            PartType::Transistor => "Q",
            PartType::Ammeter => "A",
            PartType::Voltmeter => "VM",
            PartType::Ground => "GND",
        }
    }

    /// Snake-case catalog name
    pub fn name(self) -> &'static str {
        match self {
            PartType::Resistor => "resistor",
            PartType::Capacitor => "capacitor",
            PartType::Inductor => "inductor",
            PartType::DcVoltageSource => "dc_voltage_source",
            PartType::AcVoltageSource => "ac_voltage_source",
            PartType::CurrentSource => "current_source",
            PartType::Diode => "diode",
            PartType::Transistor => "transistor",
            PartType::Ammeter => "ammeter",
            PartType::Voltmeter => "voltmeter",
            PartType::Ground => "ground",
        }
    }

    /// Get all part types
    pub fn all() -> &'static [PartType] {
        &[
            PartType::Resistor,
            PartType::Capacitor,
            PartType::Inductor,
            PartType::DcVoltageSource,
            PartType::AcVoltageSource,
            PartType::CurrentSource,
            PartType::Diode,
            PartType::Transistor,
            PartType::Ammeter,
            PartType::Voltmeter,
            PartType::Ground,
        ]
    }

    /// Find the part type owning an ID prefix
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.prefix() == prefix)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartType {
    type Err = String;

    /// Accepts either the catalog name (`resistor`) or the ID prefix (`R`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase().replace('-', "_");
        PartType::all()
            .iter()
            .copied()
            .find(|p| p.name() == lower)
            .or_else(|| PartType::from_prefix(s))
            .ok_or_else(|| format!("Unknown part type: {}", s))
    }
}
