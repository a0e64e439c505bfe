//! Command-line interface for steprunner.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ListArgs, PlanArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, EXIT_NO_CONFIG};
