//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::numeric::{
    FormatArgs, MagnitudeArgs, OptionsArgs, ParseArgs, RoundArgs, SplitArgs,
};
use crate::cli::commands::replay::ReplayArgs;
use crate::core::Config;

/// Engineering-notation codec and entity registry diagnostics for schematics
#[derive(Parser, Debug)]
#[command(name = "schem", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of the user config
    #[arg(long, global = true, env = "SCHEM_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    /// Load the config named by `--config`, or the user config
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path).into_diagnostic(),
            None => Ok(Config::load()),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse engineering-notation values (1k, 2.2u, 1e-3)
    Parse(ParseArgs),

    /// Split a stored value into mantissa and suffix
    Split(SplitArgs),

    /// Format a value at a suffix, or pick one automatically
    Format(FormatArgs),

    /// Round a value to significant digits
    Round(RoundArgs),

    /// Print floor(log10(value))
    Magnitude(MagnitudeArgs),

    /// List unit selection options
    Options(OptionsArgs),

    /// Replay a script of entity lifecycle operations and dump the registry
    Replay(ReplayArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text for terminals
    #[default]
    Auto,
    /// Plain text
    Text,
    /// JSON
    Json,
    /// YAML
    Yaml,
}
