//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait, the leveled message sink the runner reports to
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for capturing messages in tests
//!
//! Diagnostic logging goes through `tracing` instead; this trait carries
//! only what a person running steps needs to see.

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::{Level, MockUI};
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display low-verbosity detail (skipped steps, resolved order).
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Styling for callers that format their own lines.
    fn theme(&self) -> Theme {
        Theme::plain()
    }
}
