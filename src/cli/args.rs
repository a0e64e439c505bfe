//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// steprunner - ordered build steps with hooks and group filters.
#[derive(Debug, Parser)]
#[command(name = "steprunner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the run file (overrides default steps.yml)
    #[arg(short, long, global = true, env = "STEPRUNNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the steps (default if no command specified)
    Run(RunArgs),

    /// Show the resolved execution order without running anything
    Plan(PlanArgs),

    /// List declared steps
    List(ListArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Only run steps in these groups (comma-separated, "all" for every step)
    #[arg(short, long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Extra properties, "key=value;key2=value2" (repeatable)
    #[arg(short = 'P', long = "property", value_name = "PROPS")]
    pub properties: Vec<String>,

    /// Keep going after a step fails
    #[arg(long)]
    pub no_stop: bool,

    /// Report what would run without executing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArgs {
    /// Mark eligibility against these groups (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only list steps in these groups (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub groups: Vec<String>,
}
