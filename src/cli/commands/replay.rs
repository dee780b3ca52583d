//! `schem replay` command - run lifecycle operations and dump the registry
//!
//! Scripts are YAML lists of operations:
//!
//! ```yaml
//! - op: create
//!   kind: resistor
//! - op: create
//!   kind: wire
//!   connections: [R_1]
//! - op: rename
//!   from: R_1
//!   to: R_load
//! - op: destroy
//!   id: line_1
//! ```

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::helpers::truncate_str;
use crate::cli::output::print_structured;
use crate::cli::GlobalOpts;
use crate::core::{
    EntityHandle, EntityKind, NewEntity, RegistryError, RegistryService, RegistrySnapshot,
    VisualHandle,
};

#[derive(clap::Args, Debug)]
pub struct ReplayArgs {
    /// YAML script of lifecycle operations
    pub script: PathBuf,

    /// Report failing operations and continue instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

/// One scripted lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptOp {
    Create {
        kind: String,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        connections: Vec<String>,
        #[serde(default)]
        visual: Option<u64>,
    },
    Rename {
        from: String,
        to: String,
    },
    Rewire {
        id: String,
        #[serde(default)]
        connections: Vec<String>,
    },
    Destroy {
        id: String,
    },
}

impl std::fmt::Display for ScriptOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptOp::Create { kind, id: Some(id), .. } => write!(f, "create {} {}", kind, id),
            ScriptOp::Create { kind, .. } => write!(f, "create {}", kind),
            ScriptOp::Rename { from, to } => write!(f, "rename {} -> {}", from, to),
            ScriptOp::Rewire { id, .. } => write!(f, "rewire {}", id),
            ScriptOp::Destroy { id } => write!(f, "destroy {}", id),
        }
    }
}

/// Why a scripted operation failed
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("unknown entity kind '{0}'")]
    UnknownKind(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Apply one operation to the service
pub fn apply(service: &RegistryService, op: &ScriptOp) -> Result<(), ReplayError> {
    match op {
        ScriptOp::Create {
            kind,
            id,
            connections,
            visual,
        } => {
            let kind: EntityKind = kind
                .parse()
                .map_err(|_| ReplayError::UnknownKind(kind.clone()))?;
            let mut request = NewEntity::new(kind).with_connections(connections.iter().cloned());
            request.id = id.clone();
            request.visual = visual.map(VisualHandle);
            service.create_entity(request)?;
        }
        ScriptOp::Rename { from, to } => {
            let mut handle = service.find_by_id(from)?;
            service.rename_entity(&mut handle, to)?;
        }
        ScriptOp::Rewire { id, connections } => {
            service.rewire(id, connections)?;
        }
        ScriptOp::Destroy { id } => {
            service.destroy_by_id(id)?;
        }
    }
    Ok(())
}

/// Apply every operation, stopping at the first failure unless `keep_going`
///
/// Returns the failures that were skipped over.
pub fn replay(
    service: &RegistryService,
    ops: &[ScriptOp],
    keep_going: bool,
) -> Result<Vec<(usize, String)>> {
    let mut failures = Vec::new();
    for (index, op) in ops.iter().enumerate() {
        if let Err(e) = apply(service, op) {
            if !keep_going {
                return Err(miette::miette!("step {} ({}): {}", index + 1, op, e));
            }
            failures.push((index + 1, format!("{}: {}", op, e)));
        }
    }
    Ok(failures)
}

pub fn run(args: ReplayArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.load_config()?;
    let content = std::fs::read_to_string(&args.script).into_diagnostic()?;
    let ops: Vec<ScriptOp> = serde_yml::from_str(&content).into_diagnostic()?;

    let service = config.registry_service();
    let failures = replay(&service, &ops, args.keep_going)?;

    for (step, message) in &failures {
        eprintln!("{} step {}: {}", style("✗").red(), step, message);
    }

    let snapshot = service.snapshot();
    if print_structured(&snapshot, global.output)? {
        return Ok(());
    }
    print_dump(&snapshot);
    Ok(())
}

fn print_dump(snapshot: &RegistrySnapshot) {
    print_section("Parts", snapshot.parts());
    print_section("Wires", snapshot.wires());
}

fn print_section(title: &str, handles: &[EntityHandle]) {
    println!("{} ({})", style(title).bold(), handles.len());
    for handle in handles {
        let connections = handle
            .connections
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:<10} {:<18} {}",
            style(handle.id.as_str()).cyan(),
            handle.kind.to_string(),
            truncate_str(&connections, 60)
        );
    }
}
