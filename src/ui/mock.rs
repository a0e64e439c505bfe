//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! messages for later assertion.
//!
//! # Example
//!
//! ```
//! use steprunner::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting");
//! ui.error("Step 'build.sh' failed");
//!
//! assert!(ui.has_message("Starting"));
//! assert_eq!(ui.errors().len(), 1);
//! ```

use super::{OutputMode, UserInterface};

/// A captured message with its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Detail,
    Message,
    Success,
    Warning,
    Error,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    log: Vec<(Level, String)>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    fn at(&self, level: Level) -> Vec<String> {
        self.log
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Every captured message in order, with levels.
    pub fn log(&self) -> &[(Level, String)] {
        &self.log
    }

    /// Get all captured detail messages.
    pub fn details(&self) -> Vec<String> {
        self.at(Level::Detail)
    }

    /// Get all captured messages.
    pub fn messages(&self) -> Vec<String> {
        self.at(Level::Message)
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> Vec<String> {
        self.at(Level::Success)
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::Warning)
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> Vec<String> {
        self.at(Level::Error)
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn has(&self, level: Level, msg: &str) -> bool {
        self.log.iter().any(|(l, m)| *l == level && m.contains(msg))
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.has(Level::Message, msg)
    }

    /// Check if a specific detail was shown.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.has(Level::Detail, msg)
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.has(Level::Success, msg)
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.has(Level::Warning, msg)
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.has(Level::Error, msg)
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.log.push((Level::Message, msg.to_string()));
    }

    fn detail(&mut self, msg: &str) {
        self.log.push((Level::Detail, msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.log.push((Level::Success, msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.log.push((Level::Warning, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.log.push((Level::Error, msg.to_string()));
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}
