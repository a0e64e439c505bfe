//! Shell command execution.

pub mod command;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult};
pub use platform::{detect_shell, is_ci, quote_path, script_interpreter, shell_flag};
