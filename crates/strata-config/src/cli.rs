//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use strata_terrain::WorldSize;

use crate::Config;

/// Strata world generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Deterministic 2D tile world generator")]
pub struct CliArgs {
    /// World size: tiny, small, medium or large.
    #[arg(long)]
    pub size: Option<WorldSize>,

    /// Generation seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate stateless passes in parallel (true/false).
    #[arg(long)]
    pub parallel: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.size {
            self.world.size = size;
        }
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(parallel) = args.parallel {
            self.world.parallel = parallel;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
