//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use schem::core::{EntityHandle, NewEntity, PartType, RegistryService};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

/// Helper to get a schem command
pub fn schem() -> Command {
    Command::new(cargo::cargo_bin!("schem"))
}

/// Helper to write a replay script into a temp directory
pub fn write_script(tmp: &TempDir, name: &str, yaml: &str) -> std::path::PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, yaml).unwrap();
    path
}

/// Helper to create `count` parts of one type
pub fn create_parts(service: &RegistryService, part: PartType, count: usize) -> Vec<EntityHandle> {
    (0..count)
        .map(|_| service.create_entity(NewEntity::part(part)).unwrap())
        .collect()
}

/// Assert that no two live entities share an ID and the used set agrees
pub fn assert_unique_and_consistent(service: &RegistryService) {
    let snapshot = service.snapshot();
    let mut seen = HashSet::new();
    for handle in snapshot.parts().iter().chain(snapshot.wires()) {
        assert!(seen.insert(handle.id.clone()), "duplicate id {}", handle.id);
        assert!(service.is_used(handle.id.as_str()), "{} not marked used", handle.id);
    }
    assert!(service.is_consistent());
}
