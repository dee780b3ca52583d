//! CLI command implementations

pub mod numeric;
pub mod replay;
