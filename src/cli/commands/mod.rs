//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. `run` is the default when no subcommand is given.

pub mod dispatcher;
pub mod list;
pub mod plan;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_NO_CONFIG};
