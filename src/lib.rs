//! Schem: entity identity and registry core for a schematic editor
//!
//! Assigns stable, type-scoped IDs (`R_1`, `line_4`) to parts and wires,
//! keeps the part and wire registries in step with the used-ID set, and
//! provides the engineering-notation codec used to validate part parameters.

pub mod cli;
pub mod core;
